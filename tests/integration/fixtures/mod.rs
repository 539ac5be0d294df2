// Test fixtures with realistic legal prose
// WHY: Deterministic inputs keep detection and deduplication tests reproducible

/// Short opinion excerpt with several citation families
pub const OPINION_TEXT: &str = "Trata-se de recurso interposto pelo servidor. \
O art. 37 da CF/88 impõe a observância da legalidade; nesse sentido, a Lei nº 8.112/90 disciplina o regime jurídico. \
Sobre a anulação de atos, aplica-se a Súmula 473 do STF, bem como a Lei 9.784/99.\n\n\
No mérito, o REsp 1.234.567/SP foi julgado pelo STJ. O processo 0001234-56.2020.8.26.0100 tramita regularmente. \
Por fim, a Resolução CNJ nº 125/2010 orienta a política de conciliação, e a Instrução Normativa RFB nº 1.234/2012 foi revogada.";

/// Text without any citation
pub const PLAIN_TEXT: &str = "O dia estava ensolarado. As crianças brincavam no parque enquanto os pais conversavam.";

/// Sentences of `n` filler bytes each, separated by `. `
pub fn filler_sentences(count: usize, len: usize) -> String {
    let mut text = String::new();
    for i in 0..count {
        if i > 0 {
            text.push(' ');
        }
        let letter = (b'a' + (i % 26) as u8) as char;
        text.extend(std::iter::repeat(letter).take(len.saturating_sub(1)));
        text.push('.');
    }
    text
}
