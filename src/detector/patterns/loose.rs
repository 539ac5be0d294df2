// High-recall citation families
// No lookaround here: context conditions are expressed as `Guard`s in the pattern table

pub const GENERIC_CONSTITUTION: &str = r"
(?:
    C\.?\s*F\.?(?:/\d{2,4}|\s*\d{2,4})?
    |
    Constitui[cç][aã]o\s+Federal
    |
    Carta\s+Magna
    |
    Constitui[cç][aã]o\s+Brasileira(?:\s+de\s*(?:19|20)\d{2})?
    |
    # state constitutions spelled out
    Constitui[cç][aã]o\s+(?:do\s+Estado\s+de|do\s+Estado\s+da|do\s+Estado\s+do|Estadual\s+de)\s+[A-Z][\w\s]+
    |
    # CE/SP, CE-RS
    CE\s*[-/]\s*[A-Z]{2}
    |
    # municipal organic laws
    LOM\s+(?:de|do|da)\s+[A-Z][\w\s]+
    |
    LOM\s*[-/]\s*[A-Z]{2}
    |
    Constitui[cç][aã]o\b
)
";

pub const GENERIC_ARTICLE: &str = r"
\b
(?:arts?\.?|artigo?s?)
\s*\.?\s*
\d+[A-Za-z0-9º°\-]*
";

pub const GENERIC_LAW_REFERENCE: &str = r"
(?:
    Lei(?:\s+(?:Complementar|Municipal|Estadual|Federal))?
    | LC | LCE | LCM | LCP | LD | LDL | MP
)
\s*(?:n[ºo°\.]?|n\.|no|nº)?\s*
\d{1,6}(?:\.\d{3})*
(?:-\d{1,3})?
(?:/\d{2,4})?
(?:/[A-Z]{2})?
";

pub const GENERIC_CASE: &str = r"
(?:AgRg|AgInt|AgIn|AgR|ARE|RE|REsp|AREsp|AI|HC|MS|RMS|ADI|ADPF|ADO|ADC|ACO|EDcl|EDv|Embargos\s+de\s+Declara[cç][aã]o|PET|Rcl|SL|SLS|SS|TP)
\s*
\d{1,9}(?:[\./]\d{1,4})*(?:/[A-Z]{2,3})?
";

pub const GENERIC_CODE: &str = r"
C[óo]digo\s+(?:de\s+)?[A-ZÁÉÍÓÚÂÊÔÃÕÇ][\w\s]{3,50}
";

// `RN` is a separate branch so no organ acronyms may sit between it and the number
pub const GENERIC_OTHER_ACT: &str = r"
(?:
    (?:
        Decreto | Dec\.? | Decr\.?
      | Portaria | Port\.?
      | Resolu[cç][aã]o\s+Normativa
      | Resolu[cç][aã]o | Res\.? | RDC
      | Instru[cç][aã]o(?:\s+Normativa)?
      | Instr(?:u[cç][aã]o)?\s+Normativa
      | Orienta[cç][aã]o\s+Normativa
      | Circular
      | Despacho
      | Edital
      | Ato
      | Delibera[cç][aã]o
      | Of[íi]cio
    )
    (?:\s+(?:[A-Z]{2,10}(?:/[A-Z]{2,10})?|Estadual|Municipal|Federal|Est\.|Mun\.|Fed\.)){0,3}
  |
    RN
)
\s*(?:n[ºo°\.]?|n\.|no|nº)?\s*
(?:
    \d{1,6}(?:\.\d{3})*
  | \d{1,3}\s*[kK]
)
(?:/\d{2,4})?
(?:/[A-Z]{2})?
(?:\s+(?:do|da|de)\s+[A-Z]{2,10}(?:/[A-Z]{2,10})?)?
";

pub const GENERIC_LAW_COLLECTION: &str = r"
(?:Lei|Leis)\s+(?:federais?|municipais?|estaduais?)
";

pub const GENERIC_SUMULA_ORG: &str = r"
S[úu]mulas?\s+(?:do|da)\s+(?:STF|STJ|TST|TSE|TRF|CNJ)
";

// MP nicknames ("MP do Bem") are filtered afterwards so institutions ("MP do Estado") are dropped
pub const LAW_ALIAS: &str = r"
(?:
    Lei\s+de\s+Improbidade(?:\s+Administrativa)?(?:\s+antiga)?
  | Lei\s+Anticorrup[cç][aã]o
  | Lei\s+de\s+Responsabilidade\s+Fiscal
  | Lei\s+(?:Geral\s+de\s+)?Licita[cç][oõ]es
  |
    (?:MP|Medida\s+Provis[óo]ria)
    \s+(?:da|do|dos|das)\s+
    [A-Za-zÁÉÍÓÚÂÊÔÃÕÇà-ú][\w\-]*
    (?:\s+[A-Za-zÁÉÍÓÚÂÊÔÃÕÇà-ú][\w\-]*){0,4}
)
";

pub const MP_GENERIC_YEAR: &str = r"
(?:MP|Medida\s+Provis[óo]ria)
(?:\s+[A-Za-zÁÉÍÓÚÂÊÔÃÕÇà-ú][\w\-]*){0,3}
\s+de\s+(?:19|20)\d{2}
";

pub const IN_ABBR: &str = r"
(?:
    # IN + organ acronyms + number
    \bIN\b
    (?:\s+(?:[A-Z]{2,10}(?:/[A-Z]{2,10})?))+
    \s*(?:n[ºo°\.]?|n\.|no|nº)?\s*
    \d{1,6}(?:\.\d{3})*(?:/\d{2,4})?
)
|
(?:
    # IN + nº + number
    \bIN\b
    \s*(?:n[ºo°\.]?|n\.|no|nº)\s*
    \d{1,6}(?:\.\d{3})*(?:/\d{2,4})?
)
";

pub const ORG_SIGLA_NUMBER: &str = r"
\b(?:RFB|SRF|ANVISA|ANS|ANEEL|ANATEL|ANAC|ANP|ANM|ANTT|ANTAQ|BACEN|BCB|CVM|CMN|SUSEP|PREVIC|IBAMA|INMETRO|MAPA|ME|MF|MTE|MS|MEC|MJ|MJSP|PGFN|CNSP)\b
\s*(?:n[ºo°\.]?|n\.|no|nº)?\s*
\d{1,6}(?:\.\d{3})*(?:-\d{1,3})?
(?:/\d{2,4})
";

pub const TEMA_RG: &str = r"
\bTema\s*(?:n[ºo°\.]?|n\.|no|nº)?\s*\d{1,4}(?:\.\d{3}){0,2}\b
";

pub const STJ_RECURSO_REPETITIVO: &str = r"
\b(?:recurso(?:s)?\s+)?repetitivo(?:s)?\s+(?:do|no)\s+STJ\b
";

pub const SUMULA_ABBR: &str = r"
\bSum\.?\s*\d{1,3}(?:\s*/\s*(?:STF|STJ|TST|TSE|TRF|CNJ))?\b
";

pub const SUMULA_LIST_NUMBERS: &str = r"
\bS[úu]mulas?\b
[^.\n]{0,80}
(?:n[ºo°\.]?\s*)?
\d{1,3}
(?:\s*(?:,|e)\s*(?:n[ºo°\.]?\s*)?\d{1,3})+
";

pub const SUMULA_GENERIC_TOPIC: &str = r"
\bS[úu]mula(?:\s+Vinculante)?(?:\s*(?:n[ºo°\.]?\s*)?\d{1,3})?\s+(?:do|sobre)\s+[A-Za-zÁÉÍÓÚÂÊÔÃÕÇà-ú][\w\-]+
";

pub const SUMULA_DIRTY: &str = r"
\b(?:S[úu]m|sum)\.?\s*\d{1,3}
(?:\s*[/\-]?\s*(?:STF|STJ|TST|TSE|TRF|CNJ))?
\b
";

pub const SUMULA_GENERIC: &str = r"
\bS[úu]mula(?:\s+Vinculante)?(?:\s*(?:n[ºo°\.]?\s*)?\d{1,3})?\b
";

// guarded: a court acronym must follow shortly
pub const SUMULA_GENERIC_NEAR_COURT: &str = r"
\bS[úu]mulas?\b
";

pub const OJ_TST: &str = r"
(?:
    \bOJ[-\.\s]?\s*\d{1,4}
    (?:\s*[,/\x20-]?\s*SDI\s*[-–]?\s*(?:I|II|1|2))?
    (?:\s*(?:do|da|no|na)\s*)?\s*(?:TST)?\b
)
|
(?:
    \bOrienta[cç][aã]o(?:es|ões)?\s+Jurisprudencial(?:is)?
    (?:\s*(?:n[ºo°\.]?\s*)?\d{1,4})?
    (?:\s+da\s+SDI\s*[-–]?\s*(?:I|II|1|2))?
    (?:\s+(?:do|da)\s+(?:TST|STJ|STF|TSE|TRF|CNJ))?
)
";

pub const COUNCIL_RESOLUTION_GENERIC: &str = r"
\bResolu[cç][aã]o\s+do\s+Conselho
\s+(?:Federal|Estadual|Municipal)\s+de\s+
[A-Za-zÁÉÍÓÚÂÊÔÃÕÇà-ú][\w\-]+
";

pub const REGIMENTO_INTERNO: &str = r"
\bRegimento\s+Interno
(?:\s+(?:do|da)\s+[A-Z][\w\s]{2,80})?
(?:\s*\([A-Z]{2,10}\))?
";

pub const REGIMENTO_SIGLA: &str = r"
\bRI(?:STF|STJ|TST|TSE|TRF[1-6])\b
";

pub const OTHER_ACT_JOINED_SIGLA_NUM: &str = r"
(?:
    Resolu[cç][aã]o | Res\.? | Decreto | Dec\.? | Decr\.? | Portaria | Port\.? | RDC | RN
)
\s+[A-Z]{2,10}\s*\d{1,6}(?:\.\d{3})*(?:/\d{2,4})?
";

pub const REG_INTERNO_ABBR: &str = r"
\bReg(?:imento)?\.?\s+Int(?:\.|erno)?\b
(?:\s+(?:do|da)\s+[A-Z]{2,10})?
";

pub const RESOLUTION_GENERIC_ORG: &str = r"
\bResolu[cç](?:[aã]o|[oõ]es)\s+(?:do|da)\s+(?:CNJ|ANS|ANVISA|ANEEL|ANATEL|CVM|BACEN|BCB|CONAMA|CNSP)\b
";

pub const PEC_GENERIC: &str = r"
\b(?:PEC|Proposta\s+de\s+Emenda\s+à?\s+Constitui[cç][aã]o)\b
(?:\s+(?:da|do|sobre)\s+[A-ZÁÉÍÓÚÂÊÔÃÕÇ][\w\-]+(?:\s+[A-ZÁÉÍÓÚÂÊÔÃÕÇ][\w\-]+){0,4})?
";

pub const PL_GENERIC: &str = r"
\b(?:PLs?|Projetos?\s+de\s+Lei)\b
";

pub const LEGISLATIVE_PROPOSAL_NUMBER: &str = r"
\b(?:PEC|PL|PLP|PLC|PLN|PLS|PLV|PDL)\s*\d{1,5}(?:\.\d{3})*(?:/\d{2,4})?\b
";

pub const JUDICIAL_DECISION_NUMBER: &str = r"
\b(?:STF|STJ|TST|TSE|TRF|CNJ)\s*\d{1,5}(?:\.\d{3})*(?:/\d{2,4})?\b
";

pub const OFFICIAL_MANUAL: &str = r"
(?:
    \bMCASP\b
  |
    \bManual\s+de\s+[A-ZÁÉÍÓÚÂÊÔÃÕÇ][\w\s]{3,120}\s*\([A-Z]{2,10}\)
)
";

// guarded: a court acronym must follow shortly
pub const OJ_GENERIC_NEAR_COURT: &str = r"
\bOrienta[cç](?:[aã]o|[oõ]es)\s+Jurisprudenc(?:ial(?:is)?|iais)\b
";

pub const PARECER_ORG: &str = r"
\bParecer
\s+[A-Z]{2,10}(?:/[A-Z]{2,10}){0,3}
\s*(?:n[ºo°\.]?|n\.|no|nº)?\s*
\d{1,6}(?:\.\d{3})*(?:/\d{2,4})\b
";

pub const PARECER_NUMBER_ORG_SUFFIX: &str = r"
\bParecer
\s*(?:n[ºo°\.]?|n\.|no|nº)?\s*
\d{1,6}(?:\.\d{3})*(?:/\d{2,4})
\s*[-–]?\s*
[A-Z]{2,10}(?:/[A-Z]{2,10}){0,3}\b
";

pub const NOTA_TECNICA_GENERIC: &str = r"
\bnota\s+t[eé]cnica(?:\s+(?:do|da|de)\s+(?:CNJ|ANS|ANVISA|ANEEL|ANATEL|CVM|BACEN|BCB|IBAMA|MAPA|RFB|PGFN|AG[êe]ncia\s+Reguladora))?
\b
";

pub const ESTATUTO_SOCIAL: &str = r"
\bEstatuto\s+Social\b
(?:\s+(?:da|do)\s+[A-ZÁÉÍÓÚÂÊÔÃÕÇ][\w\s\.&\-]{1,80})?
";

pub const REGULAMENTO_INTERNO: &str = r"
\bRegulamento\s+Interno\b
(?:\s+(?:de|do|da)\s+[A-ZÁÉÍÓÚÂÊÔÃÕÇ][\w\s\.&\-]{1,80})?
";

pub const POLICY_PRIVACY: &str = r"
\bPol[ií]tica\s+de\s+Privacidade\b
";

pub const DOCTRINE_CITATION: &str = r"
(?:
    \b(?:Fredie\s+)?Didier(?:\s+Jr\.?)?\b
  |
    \bCurso\s+de\s+Direito\s+[A-ZÁÉÍÓÚÂÊÔÃÕÇ][\w\s]{3,60}\b
)
";

pub const PARECER_GENERIC_ORG: &str = r"
\bParecer\s+(?:do|da|de)\s+[A-Z]{2,10}(?:/[A-Z]{2,10}){0,3}\b
";

pub const NOTA_TECNICA_ABBR: &str = r"
\bN\.?\s*T\.?\b
(?:\s+(?:do|da|de)\s+(?:ANVISA|ANS|ANEEL|ANATEL|CNJ|RFB|PGFN|BACEN|BCB))?
";

pub const EDITAL_GENERIC: &str = r"
\bEdital\b
(?:\s+(?:de|do|da)\s+[A-Za-zÁÉÍÓÚÂÊÔÃÕÇà-ú][\w\s\-]{1,80})?
";

pub const ESTATUTO_GENERIC: &str = r"
\bEstatuto\b
(?:\s+(?:do|da)\s+[A-Za-zÁÉÍÓÚÂÊÔÃÕÇà-ú][\w\s\-]{1,80})?
";

pub const ARTICLE_LIST: &str = r"
\barts?\.?\s*\d+[A-Za-z0-9º°\-]*
(?:\s*,\s*\d+[A-Za-z0-9º°\-]*)*
(?:\s+e\s+\d+[A-Za-z0-9º°\-]*)?
";
