//! Terminal host for the plume engine
//!
//! Maps the engine's world pixels onto terminal cells using half-block
//! characters (two pixels per cell), feeds keyboard input into the loop,
//! and owns terminal setup/teardown. The engine itself never touches the
//! terminal; it only sees the `Surface` handed out here.

use std::io::{self, Stdout, Write, stdout};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{self, Color as TermColor};
use crossterm::{cursor, execute, queue, terminal};

use plume::render::{Color, SKY, Surface, SurfaceHost};
use plume::sim::{GameState, Rect};
use plume::{GameLoop, Tuning};

/// World pixels per buffer pixel. One terminal cell is two buffer pixels
/// tall, so an 80x24 terminal becomes a 640x384 world.
const WORLD_SCALE: f32 = 8.0;

/// RGB pixel buffer rendered with U+2580 half blocks
struct PixelBuf {
    w: usize,
    h: usize,
    px: Vec<Color>,
}

impl PixelBuf {
    fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![SKY; w * h],
        }
    }

    fn set(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = color;
        }
    }

    fn get(&self, x: usize, y: usize) -> Color {
        self.px[y * self.w + x]
    }

    fn fill(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, color);
            }
        }
    }

    /// Emit the buffer as rows of half blocks, top pixel = foreground
    fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut fg = None;
        let mut bg = None;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);
                if fg != Some(top) {
                    queue!(out, style::SetForegroundColor(term_color(top)))?;
                    fg = Some(top);
                }
                if bg != Some(bot) {
                    queue!(out, style::SetBackgroundColor(term_color(bot)))?;
                    bg = Some(bot);
                }
                queue!(out, style::Print('\u{2580}'))?;
            }
            if row < rows - 1 {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                fg = None;
                bg = None;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// One frame of the terminal surface, in world-pixel coordinates
struct TermFrame {
    buf: PixelBuf,
}

impl TermFrame {
    fn to_buf(v: f32) -> i32 {
        (v / WORLD_SCALE).round() as i32
    }
}

impl Surface for TermFrame {
    fn size(&self) -> (u32, u32) {
        (
            (self.buf.w as f32 * WORLD_SCALE) as u32,
            (self.buf.h as f32 * WORLD_SCALE) as u32,
        )
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let x = Self::to_buf(rect.left);
        let y = Self::to_buf(rect.top);
        let w = Self::to_buf(rect.right) - x;
        let h = Self::to_buf(rect.bottom) - y;
        self.buf.fill(x, y, w, h, color);
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        let bx = cx / WORLD_SCALE;
        let by = cy / WORLD_SCALE;
        let br = (radius / WORLD_SCALE).max(0.5);
        let r2 = br * br;
        for y in (by - br) as i32..=(by + br).ceil() as i32 {
            for x in (bx - br) as i32..=(bx + br).ceil() as i32 {
                let dx = x as f32 + 0.5 - bx;
                let dy = y as f32 + 0.5 - by;
                if dx * dx + dy * dy <= r2 {
                    self.buf.set(x, y, color);
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, cx: f32, y: f32, size: f32, color: Color) {
        // Glyphs are 3x5; scale so the requested world-pixel size roughly
        // survives the cell mapping
        let s = ((size / WORLD_SCALE / 5.0).round() as i32).max(1);
        let width = text.chars().count() as i32 * 4 * s - s;
        let mut x = Self::to_buf(cx) - width / 2;
        let top = Self::to_buf(y);

        for ch in text.chars() {
            let rows = glyph(ch);
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..3 {
                    if (bits >> (2 - col)) & 1 == 1 {
                        self.buf.fill(x + col * s, top + row as i32 * s, s, s, color);
                    }
                }
            }
            x += 4 * s;
        }
    }
}

/// 3x5 bitmap glyphs: digits plus the letters the HUD uses
#[rustfmt::skip]
fn glyph(ch: char) -> [u8; 5] {
    match ch {
        '0' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b011, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        _ => [0b000; 5],
    }
}

/// Terminal-backed frame source
struct TermHost {
    out: Stdout,
}

impl TermHost {
    fn new() -> Self {
        Self { out: stdout() }
    }
}

impl SurfaceHost for TermHost {
    type Frame = TermFrame;

    fn acquire(&mut self) -> Option<TermFrame> {
        // A failed size query means the terminal is not usable this cycle
        let (cols, rows) = terminal::size().ok()?;
        if cols < 2 || rows < 2 {
            return None;
        }
        Some(TermFrame {
            buf: PixelBuf::new(cols as usize, rows as usize * 2),
        })
    }

    fn present(&mut self, frame: TermFrame) {
        if let Err(e) = frame.buf.write_to(&mut self.out) {
            log::warn!("present failed: {e}");
        }
    }
}

fn main() -> io::Result<()> {
    env_logger::init();

    let seed: u64 = rand::random();
    log::info!("run seed {seed}");
    let mut game = GameLoop::new(GameState::new(seed, Tuning::load()));

    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
    )?;

    game.start(TermHost::new());

    // Input stays on this thread; the loop thread owns step/draw
    loop {
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => game.primary_action(),
                    _ => {}
                },
                // Resizes are picked up by the next acquire
                _ => {}
            }
        }
    }

    game.stop();

    execute!(
        out,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )?;
    terminal::disable_raw_mode()
}
