use eyre::WrapErr;
use eyre::bail;
use eyre::eyre;
use tracing::debug;

/// Number of back buffers in the swap chain.
pub const FRAME_COUNT: u32 = 2;

/// Largest accepted client width or height, the Direct3D 12 limit for a 2D
/// texture side (`D3D12_REQ_TEXTURE2D_U_OR_V_DIMENSION`).
pub const MAX_DIMENSION: u32 = 16384;

/// Where the window goes and how big its client area is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowPlacement {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowPlacement {
    fn default() -> Self {
        Self {
            x: 100,
            y: 100,
            width: 900,
            height: 500,
        }
    }
}

/// Settings shared by every demo, built from the process arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoConfig {
    pub window: WindowPlacement,
    pub use_warp_device: bool,
    /// Passed straight to `IDXGISwapChain::Present`. 0 disables vsync.
    pub sync_interval: u32,
    pub debug_layer: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window: WindowPlacement::default(),
            use_warp_device: false,
            sync_interval: 1,
            debug_layer: cfg!(debug_assertions),
        }
    }
}

impl DemoConfig {
    /// Parses flags such as `-warp`, `/novsync` or `-width 1280`.
    ///
    /// The program name must already be stripped. Flags are matched without
    /// regard to case and may start with either `-` or `/`.
    pub fn from_args<I, S>(args: I) -> eyre::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let arg = arg.as_ref();
            let Some(flag) = arg.strip_prefix('-').or_else(|| arg.strip_prefix('/')) else {
                debug!("Ignoring argument {arg:?}");
                continue;
            };

            match flag.to_ascii_lowercase().as_str() {
                "warp" => config.use_warp_device = true,
                "novsync" => config.sync_interval = 0,
                "debug" => config.debug_layer = true,
                "nodebug" => config.debug_layer = false,
                "width" => config.window.width = parse_dimension(flag, args.next())?,
                "height" => config.window.height = parse_dimension(flag, args.next())?,
                _ => debug!("Ignoring unknown flag {arg:?}"),
            }
        }

        Ok(config)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.window.width as f32 / self.window.height as f32
    }
}

fn parse_dimension<S: AsRef<str>>(flag: &str, value: Option<S>) -> eyre::Result<u32> {
    let value = value.ok_or_else(|| eyre!("-{flag} expects a value"))?;
    let value = value.as_ref();
    let parsed: u32 = value
        .parse()
        .wrap_err_with(|| format!("-{flag} expects a positive integer, got {value:?}"))?;
    if parsed == 0 {
        bail!("-{flag} must be greater than zero");
    }
    if parsed > MAX_DIMENSION {
        bail!("-{flag} must be at most {MAX_DIMENSION}, got {parsed}");
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_demo_window() {
        let config = DemoConfig::from_args(Vec::<String>::new()).unwrap();
        assert_eq!(
            config.window,
            WindowPlacement {
                x: 100,
                y: 100,
                width: 900,
                height: 500
            }
        );
        assert!(!config.use_warp_device);
        assert_eq!(config.sync_interval, 1);
        assert_eq!(config.debug_layer, cfg!(debug_assertions));
    }

    #[test]
    fn flags_accept_either_prefix_and_any_case() {
        let config = DemoConfig::from_args(["/WARP", "-NoVsync", "-nodebug"]).unwrap();
        assert!(config.use_warp_device);
        assert_eq!(config.sync_interval, 0);
        assert!(!config.debug_layer);

        let config = DemoConfig::from_args(["-debug"]).unwrap();
        assert!(config.debug_layer);
    }

    #[test]
    fn size_flags_take_a_value() {
        let config = DemoConfig::from_args(["-width", "1280", "/height", "720"]).unwrap();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 720);
        assert!((config.aspect_ratio() - 1280.0 / 720.0).abs() < f32::EPSILON);
    }

    #[test]
    fn bad_size_values_are_rejected() {
        assert!(DemoConfig::from_args(["-width"]).is_err());
        assert!(DemoConfig::from_args(["-width", "wide"]).is_err());
        assert!(DemoConfig::from_args(["-height", "0"]).is_err());
        assert!(DemoConfig::from_args(["-height", "-5"]).is_err());
    }

    #[test]
    fn sizes_are_capped_at_the_texture_limit() {
        let config = DemoConfig::from_args(["-width", "16384", "-height", "16384"]).unwrap();
        assert_eq!(config.window.width, MAX_DIMENSION);
        assert_eq!(config.window.height, MAX_DIMENSION);

        assert!(DemoConfig::from_args(["-width", "16385"]).is_err());
        let err = DemoConfig::from_args(["-width", "3000000000"]).unwrap_err();
        assert!(err.to_string().contains("at most 16384"), "{err}");
    }

    #[test]
    fn unknown_arguments_are_ignored() {
        let config = DemoConfig::from_args(["shaders.hlsl", "-fullscreen"]).unwrap();
        assert_eq!(config, DemoConfig::default());
    }
}
