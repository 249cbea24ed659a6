use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use ratatui::style::{Color, Style};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::grid::Rect;

const APP_DIR_NAME: &str = "terminal-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Tick interval in milliseconds.
pub const DEFAULT_HEARTBEAT_MS: u64 = 100;

/// Outer rectangle of the playing field, border included.
pub const DEFAULT_OUTER: Rect = Rect::new(5, 5, 40, 20);

/// Smallest outer rectangle that still leaves a 2×2 inner region.
pub const MIN_OUTER_SIDE: i32 = 4;

pub const GLYPH_TOP_LEFT: &str = "┌";
pub const GLYPH_TOP_RIGHT: &str = "┐";
pub const GLYPH_BOTTOM_LEFT: &str = "└";
pub const GLYPH_BOTTOM_RIGHT: &str = "┘";
pub const GLYPH_HORIZONTAL: &str = "─";
pub const GLYPH_VERTICAL: &str = "│";
pub const GLYPH_FILL: &str = " ";

// Not every terminal font has the filled side triangles, hence `<` and `>`.
pub const GLYPH_HEAD_UP: &str = "▲";
pub const GLYPH_HEAD_DOWN: &str = "▼";
pub const GLYPH_HEAD_LEFT: &str = "<";
pub const GLYPH_HEAD_RIGHT: &str = ">";
pub const GLYPH_HEAD_STOPPED: &str = "■";
pub const GLYPH_TAIL: &str = " ";

pub const RESTART_PROMPT: &str = "Game Over! Do you want to restart? (Y/N)";

/// Styles applied to every element drawn on the display.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub border: Style,
    pub canvas: Style,
    pub snake_head: Style,
    pub snake_tail: Style,
    pub fruit: Style,
    pub prompt: Style,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            border: Style::new().fg(Color::Blue).bg(Color::White),
            canvas: Style::new().bg(Color::Gray),
            snake_head: Style::new().fg(Color::Blue).bg(Color::Gray),
            snake_tail: Style::new().fg(Color::Gray).bg(Color::Blue),
            fruit: Style::new().fg(Color::Blue).bg(Color::White),
            prompt: Style::new().fg(Color::Red).bg(Color::White),
        }
    }
}

/// Immutable settings for one game session.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub heartbeat: Duration,
    pub outer: Rect,
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            heartbeat: Duration::from_millis(DEFAULT_HEARTBEAT_MS),
            outer: DEFAULT_OUTER,
            palette: Palette::default(),
        }
    }
}

impl GameConfig {
    /// Default settings with a different playing field.
    #[must_use]
    pub fn with_outer(outer: Rect) -> Self {
        Self {
            outer,
            ..Self::default()
        }
    }

    /// Loads settings from `path`, or from the user config file when `None`.
    ///
    /// A missing user config file yields the defaults. An explicitly requested
    /// file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => load_from_path(path),
            None => match config_path() {
                Some(path) => match load_from_path(&path) {
                    Err(ConfigError::Read { source, .. })
                        if source.kind() == io::ErrorKind::NotFound =>
                    {
                        Ok(Self::default())
                    }
                    other => other,
                },
                None => Ok(Self::default()),
            },
        }
    }

    /// Width and height a display needs to show the whole field.
    #[must_use]
    pub fn required_extent(&self) -> (u16, u16) {
        let width = u16::try_from(self.outer.right().max(0)).unwrap_or(u16::MAX);
        let height = u16::try_from(self.outer.bottom().max(0)).unwrap_or(u16::MAX);
        let prompt_width = u16::try_from(RESTART_PROMPT.chars().count()).unwrap_or(u16::MAX);
        (width.max(prompt_width), height.max(1))
    }
}

/// Returns the platform-correct user config path.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    heartbeat_ms: Option<u64>,
    #[serde(default)]
    grid: Option<GridFile>,
    #[serde(default)]
    palette: PaletteFile,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct GridFile {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PaletteFile {
    border: Option<StyleFile>,
    canvas: Option<StyleFile>,
    snake_head: Option<StyleFile>,
    snake_tail: Option<StyleFile>,
    fruit: Option<StyleFile>,
    prompt: Option<StyleFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct StyleFile {
    fg: Option<String>,
    bg: Option<String>,
}

fn load_from_path(path: &Path) -> Result<GameConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&raw)
}

/// Accepts a grid only when it has a playable interior and every cell is
/// addressable on a terminal.
fn grid_rect(grid: &GridFile) -> Result<Rect, ConfigError> {
    let far_edge_fits = |origin: i32, extent: i32| {
        origin >= 0
            && origin
                .checked_add(extent)
                .is_some_and(|edge| u16::try_from(edge).is_ok())
    };

    if grid.width < MIN_OUTER_SIDE
        || grid.height < MIN_OUTER_SIDE
        || !far_edge_fits(grid.x, grid.width)
        || !far_edge_fits(grid.y, grid.height)
    {
        return Err(ConfigError::InvalidGrid {
            x: grid.x,
            y: grid.y,
            width: grid.width,
            height: grid.height,
        });
    }

    Ok(Rect::new(grid.x, grid.y, grid.width, grid.height))
}

fn parse_config(raw: &str) -> Result<GameConfig, ConfigError> {
    let file = serde_json::from_str::<ConfigFile>(raw)?;
    let mut config = GameConfig::default();

    if let Some(heartbeat_ms) = file.heartbeat_ms {
        config.heartbeat = Duration::from_millis(heartbeat_ms);
    }

    if let Some(grid) = file.grid {
        config.outer = grid_rect(&grid)?;
    }

    let palette = &mut config.palette;
    let overrides = [
        (&mut palette.border, file.palette.border),
        (&mut palette.canvas, file.palette.canvas),
        (&mut palette.snake_head, file.palette.snake_head),
        (&mut palette.snake_tail, file.palette.snake_tail),
        (&mut palette.fruit, file.palette.fruit),
        (&mut palette.prompt, file.palette.prompt),
    ];
    for (style, entry) in overrides {
        if let Some(entry) = entry {
            apply_style(style, &entry)?;
        }
    }

    Ok(config)
}

fn apply_style(style: &mut Style, entry: &StyleFile) -> Result<(), ConfigError> {
    if let Some(fg) = entry.fg.as_deref() {
        *style = style.fg(parse_color(fg)?);
    }
    if let Some(bg) = entry.bg.as_deref() {
        *style = style.bg(parse_color(bg)?);
    }
    Ok(())
}

fn parse_color(value: &str) -> Result<Color, ConfigError> {
    if value.eq_ignore_ascii_case("none") {
        return Ok(Color::Reset);
    }

    Color::from_str(value).map_err(|_| ConfigError::InvalidColor(value.to_owned()))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use ratatui::style::Color;

    use super::{parse_config, GameConfig, Palette, DEFAULT_OUTER};
    use crate::error::ConfigError;
    use crate::grid::Rect;

    #[test]
    fn empty_object_yields_defaults() {
        let config = parse_config("{}").expect("empty config should parse");

        assert_eq!(config, GameConfig::default());
        assert_eq!(config.heartbeat, Duration::from_millis(100));
        assert_eq!(config.outer, DEFAULT_OUTER);
    }

    #[test]
    fn overrides_heartbeat_grid_and_palette() {
        let raw = r##"{
            "heartbeat_ms": 80,
            "grid": { "x": 0, "y": 1, "width": 20, "height": 12 },
            "palette": {
                "fruit": { "fg": "yellow", "bg": "#102030" },
                "canvas": { "bg": "none" }
            }
        }"##;

        let config = parse_config(raw).expect("config should parse");

        assert_eq!(config.heartbeat, Duration::from_millis(80));
        assert_eq!(config.outer, Rect::new(0, 1, 20, 12));
        assert_eq!(config.palette.fruit.fg, Some(Color::Yellow));
        assert_eq!(config.palette.fruit.bg, Some(Color::Rgb(0x10, 0x20, 0x30)));
        assert_eq!(config.palette.canvas.bg, Some(Color::Reset));
        assert_eq!(config.palette.border, Palette::default().border);
    }

    #[test]
    fn rejects_grid_without_playable_interior() {
        let raw = r#"{ "grid": { "x": 0, "y": 0, "width": 3, "height": 10 } }"#;

        assert!(matches!(
            parse_config(raw),
            Err(ConfigError::InvalidGrid {
                width: 3,
                height: 10,
                ..
            })
        ));
    }

    #[test]
    fn rejects_grid_past_terminal_range() {
        let rejected = [
            r#"{ "grid": { "x": 2147483640, "y": 0, "width": 40, "height": 20 } }"#,
            r#"{ "grid": { "x": 0, "y": 2147483647, "width": 40, "height": 20 } }"#,
            r#"{ "grid": { "x": 0, "y": 0, "width": 60000, "height": 60000 } }"#,
            r#"{ "grid": { "x": -3, "y": 0, "width": 40, "height": 20 } }"#,
        ];
        for raw in rejected {
            assert!(
                matches!(parse_config(raw), Err(ConfigError::InvalidGrid { .. })),
                "{raw}"
            );
        }

        let widest = r#"{ "grid": { "x": 35, "y": 0, "width": 65500, "height": 20 } }"#;
        let config = parse_config(widest).expect("grid ending at 65535 should parse");
        assert_eq!(config.required_extent(), (u16::MAX, 20));
    }

    #[test]
    fn required_extent_saturates_for_out_of_range_grids() {
        let config = GameConfig::with_outer(Rect::new(i32::MAX - 5, 0, 40, 20));

        assert_eq!(config.required_extent(), (u16::MAX, 20));
    }

    #[test]
    fn rejects_unknown_color() {
        let raw = r#"{ "palette": { "border": { "fg": "not-a-color" } } }"#;

        assert!(matches!(
            parse_config(raw),
            Err(ConfigError::InvalidColor(value)) if value == "not-a-color"
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(parse_config("nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let path = unique_test_path("missing");

        assert!(matches!(
            GameConfig::load(Some(&path)),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn explicit_file_is_loaded() {
        let path = unique_test_path("explicit");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, r#"{ "heartbeat_ms": 250 }"#).expect("test file write should succeed");

        let config = GameConfig::load(Some(&path)).expect("config should load");
        assert_eq!(config.heartbeat, Duration::from_millis(250));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn required_extent_covers_field_and_prompt() {
        let config = GameConfig::default();

        assert_eq!(config.required_extent(), (45, 25));
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("snake-config-tests")
            .join(format!("{label}-{nanos}.json"))
    }
}
