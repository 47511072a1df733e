pub struct Spinner {
    frames: &'static [&'static str],
}

impl Spinner {
    pub fn new() -> Self {
        Self {
            frames: &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
        }
    }

    pub fn frame(&self, tick: u64) -> &'static str {
        let idx = (tick as usize) % self.frames.len();
        self.frames[idx]
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_frames() {
        let spinner = Spinner::new();
        assert_eq!(spinner.frame(0), "⠋");
        assert_eq!(spinner.frame(1), "⠙");
        assert_eq!(spinner.frame(10), "⠋");
    }
}
