//! Layout constants, compositing defaults and runtime settings

use std::path::PathBuf;

// Bouquet geometry, all in normalized canvas units
/// Horizontal centre of the head dome
pub const HEAD_CENTER_X: f64 = 0.5;
/// Vertical centre of the head dome
pub const HEAD_CENTER_Y: f64 = 0.32;
/// Horizontal radius of the head dome ellipse
pub const HEAD_RADIUS_X: f64 = 0.22;
/// Vertical radius of the head dome ellipse
pub const HEAD_RADIUS_Y: f64 = 0.16;
/// Horizontal position where all stems meet
pub const TIE_POINT_X: f64 = 0.5;
/// Vertical position where all stems meet
pub const TIE_POINT_Y: f64 = 0.72;
/// Bottom edge of the wrapped stem bundle
pub const WRAP_BASE_Y: f64 = 0.86;

// Jitter is authored in pixels against a 400px reference canvas
/// Maximum jitter in reference pixels
pub const JITTER_PX: f64 = 8.0;
/// Width of the canvas the jitter is expressed against
pub const JITTER_REFERENCE_PX: f64 = 400.0;

/// Lower bound of the hero flower scale
pub const HERO_SCALE_MIN: f64 = 1.20;
/// Width of the hero flower scale range
pub const HERO_SCALE_SPAN: f64 = 0.15;
/// Lower bound of every other head's scale
pub const HEAD_SCALE_MIN: f64 = 0.85;
/// Width of the regular head scale range
pub const HEAD_SCALE_SPAN: f64 = 0.30;
/// No head is ever drawn larger than this
pub const MAX_SCALE: f64 = 1.35;

// Linear congruential generator parameters
/// LCG multiplier
pub const LCG_MULTIPLIER: u64 = 9301;
/// LCG increment
pub const LCG_INCREMENT: u64 = 49297;
/// LCG modulus, also the output divisor
pub const LCG_MODULUS: u64 = 233_280;

// Compositing
/// Default square canvas edge in pixels
pub const DEFAULT_CANVAS_SIZE: u32 = 400;
/// Sprite base size as a fraction of the shorter canvas edge
pub const BASE_SIZE_FRACTION: f32 = 0.28;
/// Fraction of a flower source image holding the head
pub const HEAD_RATIO_FLOWER: f32 = 0.38;
/// Fraction of a prop source image holding the head
pub const HEAD_RATIO_PROP: f32 = 0.42;
/// Stem stroke width in pixels
pub const STEM_WIDTH_PX: f32 = 3.0;
/// Horizontal stagger applied to stem control points in pixels
pub const STEM_STAGGER_PX: f32 = 12.0;
/// JPEG quality used for the emailed variant
pub const JPEG_QUALITY: u8 = 85;

// Colours as straight RGBA
/// Canvas background (`#fff0fa`)
pub const BACKGROUND_RGBA: [u8; 4] = [255, 240, 250, 255];
/// Ground shadow, black at 6% opacity
pub const SHADOW_RGBA: [u8; 4] = [0, 0, 0, 15];
/// Flower stems, green at 55% opacity
pub const FLOWER_STEM_RGBA: [u8; 4] = [76, 175, 80, 140];
/// Prop sticks, brown at 70% opacity
pub const PROP_STEM_RGBA: [u8; 4] = [139, 90, 43, 179];
/// Wrap paper cone
pub const WRAP_RGBA: [u8; 4] = [255, 205, 225, 235];
/// Wrapped stem tail below the tie point
pub const WRAP_TAIL_RGBA: [u8; 4] = [246, 186, 212, 240];
/// Ribbon band and bow
pub const RIBBON_RGBA: [u8; 4] = [255, 236, 170, 255];
/// Bow knot at the tie point
pub const RIBBON_KNOT_RGBA: [u8; 4] = [246, 214, 128, 255];

// Delivery
/// Requests allowed per client key inside one window
pub const RATE_LIMIT_MAX_REQUESTS: usize = 5;
/// Length of the rolling rate limit window in milliseconds
pub const RATE_LIMIT_WINDOW_MS: u64 = 60 * 60 * 1000;
/// Longest accepted greeting message in characters
pub const MAX_MESSAGE_CHARS: usize = 200;
/// Longest accepted sender name in characters
pub const MAX_SENDER_NAME_CHARS: usize = 100;
/// Subject line of every delivered bouquet
pub const MAIL_SUBJECT: &str = "You received a virtual bouquet!";
/// Body used when the sender left no message
pub const DEFAULT_MAIL_TEXT: &str = "Someone sent you a bouquet from Build Your Own Bouquet!";
/// Prefix of persisted bouquet artifacts
pub const ARTIFACT_PREFIX: &str = "bouquet";
/// Length of the random base36 artifact suffix
pub const ARTIFACT_SUFFIX_LEN: usize = 6;

// Default values for configurable parameters
/// Fixed seed for reproducible rendering
pub const DEFAULT_SEED: u64 = 42;
/// Default number of layouts rendered per invocation
pub const DEFAULT_VARIATIONS: usize = 1;
/// Default asset directory holding `flowers/` and `props/`
pub const DEFAULT_ASSETS_DIR: &str = "assets";
/// Default directory for persisted bouquet artifacts
pub const DEFAULT_GENERATED_DIR: &str = "generated";
/// Default directory the outbox transport writes into
pub const DEFAULT_OUTBOX_DIR: &str = "outbox";
/// `BOUQUET_OUTBOX_DIR` values that turn mail delivery off
pub const OUTBOX_DISABLED_VALUES: [&str; 2] = ["none", "off"];
/// Sender address used when none is configured
pub const DEFAULT_MAIL_FROM: &str = "bouquets@localhost";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

/// Runtime settings resolved from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory holding `flowers/` and `props/` sprite folders
    pub assets_dir: PathBuf,
    /// Directory persisted artifacts are written to
    pub generated_dir: PathBuf,
    /// Directory the outbox mail transport writes into, `None` skips delivery
    pub outbox_dir: Option<PathBuf>,
    /// Envelope sender address
    pub mail_from: String,
    /// Gemini API key, AI features are disabled without it
    pub gemini_api_key: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            generated_dir: PathBuf::from(DEFAULT_GENERATED_DIR),
            outbox_dir: Some(PathBuf::from(DEFAULT_OUTBOX_DIR)),
            mail_from: DEFAULT_MAIL_FROM.to_string(),
            gemini_api_key: None,
        }
    }
}

impl Settings {
    /// Load settings from the process environment, reading `.env` if present
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through an arbitrary variable lookup
    ///
    /// Blank values are treated as unset. `BOUQUET_OUTBOX_DIR=none` (or `off`)
    /// disables mail delivery.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Self {
            assets_dir: get("BOUQUET_ASSETS_DIR").map_or(defaults.assets_dir, PathBuf::from),
            generated_dir: get("BOUQUET_GENERATED_DIR")
                .map_or(defaults.generated_dir, PathBuf::from),
            outbox_dir: get("BOUQUET_OUTBOX_DIR").map_or(defaults.outbox_dir, |value| {
                let disabled = OUTBOX_DISABLED_VALUES
                    .iter()
                    .any(|off| value.trim().eq_ignore_ascii_case(off));
                (!disabled).then(|| PathBuf::from(value))
            }),
            mail_from: get("BOUQUET_MAIL_FROM").unwrap_or(defaults.mail_from),
            gemini_api_key: get("GEMINI_API_KEY"),
        }
    }
}
