//! A plain character framebuffer.

use unicode_width::UnicodeWidthStr;

pub struct Frame {
    rows: Vec<Vec<char>>,
    width: usize,
}

impl Frame {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            rows: vec![vec![' '; width]; height],
            width,
        }
    }

    pub fn set(&mut self, x: i64, y: i64, ch: char) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if y < self.rows.len() && x < self.width {
            self.rows[y][x] = ch;
        }
    }

    /// Writes `text` starting at `(x, y)`, clipped to the frame.
    pub fn put_str(&mut self, x: i64, y: i64, text: &str) {
        let mut x = x;
        for ch in text.chars() {
            self.set(x, y, ch);
            x += 1;
        }
    }

    /// Writes `text` centered within `width` columns starting at `x`.
    pub fn put_centered(&mut self, x: i64, y: i64, width: usize, text: &str) {
        let text_width = UnicodeWidthStr::width(text);
        let pad = width.saturating_sub(text_width) / 2;
        self.put_str(x + pad as i64, y, text);
    }

    /// The rendered text: one line per row, trailing blanks trimmed, trailing newline kept.
    pub fn into_string(self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let line: String = row.iter().collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        // Drop blank lines at the bottom but keep the final newline.
        while out.ends_with("\n\n") {
            out.pop();
        }
        out
    }
}
