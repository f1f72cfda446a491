#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use image::{DynamicImage, GenericImageView};

use kikiqr::Color;

pub const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

const KIKIQR_VARS: &[&str] = &[
    "KIKIQR_URL",
    "KIKIQR_OUTPUT",
    "KIKIQR_SCALE",
    "KIKIQR_BORDER",
    "KIKIQR_DARK",
    "KIKIQR_LIGHT",
    "KIKIQR_FINDER_DARK",
    "KIKIQR_FINDER_LIGHT",
    "KIKIQR_QUIET_ZONE",
    "KIKIQR_ERROR_CORRECTION",
    "KIKIQR_VERIFY",
    "KIKIQR_LOG_LEVEL",
    "KIKIQR_LOG_FILE",
    "KIKIQR_LOG_COLOR",
    "KIKIQR_LOG_ROTATION",
];

/// The binary run from `cwd` with a clean `KIKIQR_*` environment and no XDG config.
pub fn kikiqr_cmd(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("kikiqr").expect("binary built");
    cmd.current_dir(cwd).env("XDG_CONFIG_HOME", cwd.join("no-xdg"));
    for var in KIKIQR_VARS {
        cmd.env_remove(var);
    }
    cmd
}

pub fn pixel(img: &DynamicImage, x: u32, y: u32) -> Color {
    Color::from(img.get_pixel(x, y))
}
