use beamline_core::core::Overlay;
use beamline_core::input::lightgun::CROSSHAIR_SIZE;

/// Minimal 4x5 bitmap font for overlay text. Each glyph is 4 pixels wide, 5 rows tall.
/// Bits are MSB-left within each u8 (only top 4 bits used).
const GLYPHS: &[(&[u8; 5], u8)] = &[
    // '0'
    (&[0x60, 0x90, 0x90, 0x90, 0x60], b'0'),
    // '1'
    (&[0x20, 0x60, 0x20, 0x20, 0x70], b'1'),
    // '2'
    (&[0x60, 0x90, 0x20, 0x40, 0xF0], b'2'),
    // '3'
    (&[0x60, 0x90, 0x20, 0x90, 0x60], b'3'),
    // '4'
    (&[0x90, 0x90, 0xF0, 0x10, 0x10], b'4'),
    // '5'
    (&[0xF0, 0x80, 0xE0, 0x10, 0xE0], b'5'),
    // '6'
    (&[0x60, 0x80, 0xE0, 0x90, 0x60], b'6'),
    // '7'
    (&[0xF0, 0x10, 0x20, 0x40, 0x40], b'7'),
    // '8'
    (&[0x60, 0x90, 0x60, 0x90, 0x60], b'8'),
    // '9'
    (&[0x60, 0x90, 0x70, 0x10, 0x60], b'9'),
    // '.'
    (&[0x00, 0x00, 0x00, 0x00, 0x40], b'.'),
    // 'A'
    (&[0x60, 0x90, 0xF0, 0x90, 0x90], b'A'),
    // 'B'
    (&[0xE0, 0x90, 0xE0, 0x90, 0xE0], b'B'),
    // 'L'
    (&[0x80, 0x80, 0x80, 0x80, 0xF0], b'L'),
    // 'R'
    (&[0xE0, 0x90, 0xE0, 0xA0, 0x90], b'R'),
    // ' '
    (&[0x00, 0x00, 0x00, 0x00, 0x00], b' '),
];

const GLYPH_W: usize = 4;
const GLYPH_H: usize = 5;

const WHITE: [u8; 3] = [255, 255, 255];
const YELLOW: [u8; 3] = [255, 220, 0];
const CROSSHAIR: [u8; 3] = [255, 32, 32];

fn glyph_for(ch: u8) -> &'static [u8; 5] {
    for &(data, c) in GLYPHS {
        if c == ch {
            return data;
        }
    }
    // fallback: space
    &[0x00, 0x00, 0x00, 0x00, 0x00]
}

fn put_pixel(buffer: &mut [u8], width: usize, x: i32, y: i32, color: [u8; 3]) {
    if x < 0 || y < 0 || x as usize >= width {
        return;
    }
    let offset = (y as usize * width + x as usize) * 3;
    if offset + 2 < buffer.len() {
        buffer[offset..offset + 3].copy_from_slice(&color);
    }
}

fn draw_text(buffer: &mut [u8], width: usize, x0: usize, y0: usize, text: &str, color: [u8; 3]) {
    for (ci, ch) in text.bytes().enumerate() {
        let glyph = glyph_for(ch);
        let gx = x0 + ci * (GLYPH_W + 1);

        for (row, &bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_W {
                if bits & (0x80 >> col) != 0 {
                    put_pixel(buffer, width, (gx + col) as i32, (y0 + row) as i32, color);
                }
            }
        }
    }
}

/// Draw an FPS string (e.g. "60.1") onto an RGB24 framebuffer.
/// Renders at the top-left corner with 1px padding.
pub fn draw_fps(buffer: &mut [u8], width: usize, fps: f32) {
    draw_text(buffer, width, 2, 2, &format!("{fps:.1}"), WHITE);
}

/// Draw the light-gun reticle: a cross of `CROSSHAIR_SIZE` pixels per arm
/// pair, centred on `(cx, cy)` and clipped to the frame.
pub fn draw_crosshair(buffer: &mut [u8], width: usize, (cx, cy): (i32, i32)) {
    let half = CROSSHAIR_SIZE / 2;
    for d in -half..=half {
        put_pixel(buffer, width, cx + d, cy, CROSSHAIR);
        if d != 0 {
            put_pixel(buffer, width, cx, cy + d, CROSSHAIR);
        }
    }
}

/// Draw the difficulty switch positions ("L A  R B") along the bottom edge.
pub fn draw_difficulty(buffer: &mut [u8], width: usize, height: usize, (left_on, right_on): (bool, bool)) {
    let position = |on: bool| if on { 'A' } else { 'B' };
    let text = format!("L{}  R{}", position(left_on), position(right_on));
    let y0 = height.saturating_sub(GLYPH_H + 2);
    draw_text(buffer, width, 2, y0, &text, YELLOW);
}

/// Draw every element of `overlay` onto the frame.
pub fn apply(buffer: &mut [u8], width: usize, height: usize, overlay: &Overlay) {
    if let Some(switches) = overlay.difficulty {
        draw_difficulty(buffer, width, height, switches);
    }
    if let Some(fps) = overlay.fps {
        draw_fps(buffer, width, fps);
    }
    if let Some(centre) = overlay.crosshair {
        draw_crosshair(buffer, width, centre);
    }
}
