//! Color conversion for ASS override tags
//!
//! ASS writes colors as `BBGGRR`. Stages at least 1280x576 in either
//! dimension are assumed to be rendered as BT.709 video while comment
//! colors are authored against BT.601, so their channels are remapped
//! through a fixed matrix first.
//!
//! Dialogue events are always converted against [`COLOR_REFERENCE_STAGE`],
//! whatever the run's stage size.

use crate::comment::Rgb;

#[allow(clippy::excessive_precision)]
const BT601_TO_BT709: [[f64; 3]; 3] = [
    [
        0.009_563_840_880_806_56,
        0.032_172_545_402_037_29,
        0.958_263_613_715_656_07,
    ],
    [
        -0.104_939_331_420_753_90,
        1.172_314_781_918_551_54,
        -0.067_375_450_497_797_57,
    ],
    [
        0.913_489_123_739_876_45,
        0.078_585_363_725_325_10,
        0.007_925_512_534_798_42,
    ],
];

/// Stage size used for the color overrides of dialogue events
pub const COLOR_REFERENCE_STAGE: (u32, u32) = (1280, 576);

/// Whether a stage is large enough to be treated as BT.709 video
#[must_use]
pub const fn uses_bt709(stage_width: u32, stage_height: u32) -> bool {
    !(stage_width < 1280 && stage_height < 576)
}

/// Hex `BBGGRR` string for `color` on a stage of the given size
///
/// # Example
///
/// ```rust
/// # use danmaku_core::{comment::Rgb, render::convert_color};
/// assert_eq!(convert_color(Rgb::new(0x123456), 683, 384), "563412");
/// assert_eq!(convert_color(Rgb::BLACK, 1920, 1080), "000000");
/// ```
#[must_use]
pub fn convert_color(color: Rgb, stage_width: u32, stage_height: u32) -> String {
    if color == Rgb::BLACK {
        return "000000".to_string();
    }
    if color == Rgb::WHITE {
        return "FFFFFF".to_string();
    }

    if !uses_bt709(stage_width, stage_height) {
        return format!("{:02X}{:02X}{:02X}", color.blue(), color.green(), color.red());
    }

    let (red, green, blue) = (
        f64::from(color.red()),
        f64::from(color.green()),
        f64::from(color.blue()),
    );

    // each matrix row yields one output byte, already in BGR order
    let [b, g, r] = BT601_TO_BT709.map(|[kr, kg, kb]| clip_byte(red * kr + green * kg + blue * kb));
    format!("{b:02X}{g:02X}{r:02X}")
}

fn clip_byte(value: f64) -> u8 {
    if value > 255.0 {
        255
    } else if value < 0.0 {
        0
    } else {
        value.round_ties_even() as u8
    }
}
