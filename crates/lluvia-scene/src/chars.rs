//! Character constants for the scene layers.

/// Stars from faint to bright.
pub const STAR_CHARS: &[char] = &['·', '+', '✦'];

/// Raindrops, thin to thick, leaning with the wind.
pub const RAIN_CHARS: &[char] = &['╱', '/', '⁄'];

/// Cloud puffs from wispy edge to dense core.
pub const CLOUD_CHARS: &[char] = &['░', '▒', '▓'];

/// Wave crests.
pub const WAVE_CHARS: &[char] = &['~', '∼', '≈'];

/// Splash stages from impact to fade.
pub const SPLASH_CHARS: &[char] = &['o', '°', '·'];

/// Full disk cell for the sun and moon.
pub const DISK_CHAR: char = '█';

/// Crater shading on the moon.
pub const CRATER_CHAR: char = '▓';
