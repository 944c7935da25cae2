// Tiny 5x7 bitmap font, used for the cover label and the HUD.
// Rendering is target-agnostic: callers get the lit pixel offsets and decide how to paint them.

pub const GLYPH_W: i32 = 5;
pub const GLYPH_H: i32 = 7;
/// Horizontal advance per character, in unscaled pixels (glyph + 1 px spacing).
pub const ADVANCE: i32 = GLYPH_W + 1;

/// Return a 5x7 glyph bitmap.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match fold(ch) {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '!' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00000,0b00100),
        '¡' => g!(0b00100,0b00000,0b00100,0b00100,0b00100,0b00100,0b00100),
        '%' => g!(0b11000,0b11001,0b00010,0b00100,0b01000,0b10011,0b00011),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),

        _ => None,
    }
}

/// Uppercase and strip the accents the font has no glyphs for.
fn fold(ch: char) -> char {
    match ch {
        'á' | 'à' | 'Á' | 'À' => 'A',
        'é' | 'è' | 'É' | 'È' => 'E',
        'í' | 'ì' | 'Í' | 'Ì' => 'I',
        'ó' | 'ò' | 'Ó' | 'Ò' => 'O',
        'ú' | 'ù' | 'ü' | 'Ú' | 'Ù' | 'Ü' => 'U',
        'ñ' | 'Ñ' => 'N',
        c => c.to_ascii_uppercase(),
    }
}

/// Width in pixels of `text` at `scale` (no trailing spacing).
pub fn text_width(text: &str, scale: i32) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 { 0 } else { (n * ADVANCE - 1) * scale }
}

pub fn text_height(scale: i32) -> i32 {
    GLYPH_H * scale
}

/// Call `plot(x, y)` for every lit pixel of `text` laid out from (x0, y0) at `scale`.
/// Unknown characters render as blanks but still advance.
pub fn for_each_pixel(text: &str, x0: i32, y0: i32, scale: i32, mut plot: impl FnMut(i32, i32)) {
    let scale = scale.max(1);
    let mut pen_x = x0;
    for ch in text.chars() {
        if let Some(rows) = glyph5x7(ch) {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..GLYPH_W {
                    if (rowbits & (1 << (4 - rx))) == 0 { continue; }
                    let px = pen_x + rx * scale;
                    let py = y0 + ry as i32 * scale;
                    for sy in 0..scale {
                        for sx in 0..scale {
                            plot(px + sx, py + sy);
                        }
                    }
                }
            }
        }
        pen_x += ADVANCE * scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_accounts_for_scale_and_spacing() {
        assert_eq!(text_width("", 3), 0);
        assert_eq!(text_width("A", 1), 5);
        assert_eq!(text_width("AB", 3), 33);
    }

    #[test]
    fn pixels_stay_inside_text_box() {
        let (w, h) = (text_width("SCRATCH HERE!", 3), text_height(3));
        let mut count = 0;
        for_each_pixel("SCRATCH HERE!", 0, 0, 3, |x, y| {
            assert!(x >= 0 && x < w && y >= 0 && y < h);
            count += 1;
        });
        assert!(count > 0);
    }

    #[test]
    fn accented_label_folds_to_known_glyphs() {
        let mut plain = 0;
        for_each_pixel("RASCA AQUI", 0, 0, 1, |_, _| plain += 1);
        let mut accented = 0;
        for_each_pixel("rasca aquí", 0, 0, 1, |_, _| accented += 1);
        assert_eq!(plain, accented);
    }
}
