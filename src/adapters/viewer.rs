use crate::domain::ports::Viewer;
use crate::utils::error::Result;
use std::io::{self, BufRead, Write};
use std::path::Path;

pub const EXIT_PROMPT: &str = "Press Enter to exit...";

/// 以系統預設程式開啟圖片，並等待使用者按下 Enter
#[derive(Debug, Default, Clone)]
pub struct SystemViewer;

impl SystemViewer {
    pub fn new() -> Self {
        Self
    }
}

impl Viewer for SystemViewer {
    fn present(&self, image: &Path) -> Result<()> {
        match open::that(image) {
            Ok(()) => tracing::info!("🖼️ Opened {} in the default viewer", image.display()),
            // 無法開啟檢視器不影響已輸出的檔案
            Err(e) => tracing::warn!(
                "⚠️ Could not open {} in a viewer: {}",
                image.display(),
                e
            ),
        }

        let stdin = io::stdin();
        wait_for_enter(&mut stdin.lock(), &mut io::stdout())
    }
}

/// Prints the exit prompt and blocks until a line (or EOF) is read.
pub fn wait_for_enter<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<()> {
    write!(output, "{}", EXIT_PROMPT)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}
