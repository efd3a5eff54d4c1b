use std::fmt::Display;

/// Pixel in the channel order images are handled in throughout the pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BGRColorFormat<T> {
    pub blue: T,
    pub green: T,
    pub red: T,
}

#[derive(Clone, Copy, Debug)]
pub struct RGBColorFormat<T> {
    red: T,
    green: T,
    blue: T,
}

/// Hue is stored as degrees / 2 so a full turn fits into a byte.
pub struct HSVColorFormat<T> {
    pub hue: T,
    pub saturation: T,
    pub value: T,
}

pub struct LabColorFormat<T> {
    pub lightness: T,
    pub green_red: T,
    pub blue_yellow: T,
}

pub struct YCrCbColorFormat<T> {
    pub luma: T,
    pub chroma_red: T,
    pub chroma_blue: T,
}

impl<T: Copy> BGRColorFormat<T> {
    pub fn new(blue: T, green: T, red: T) -> Self {
        BGRColorFormat { blue, green, red }
    }

    pub fn from_slice(samples: &[T]) -> Self {
        BGRColorFormat {
            blue: samples[0],
            green: samples[1],
            red: samples[2],
        }
    }

    pub fn to_array(&self) -> [T; 3] {
        [self.blue, self.green, self.red]
    }
}

impl<T> HSVColorFormat<T> {
    pub fn to_array(self) -> [T; 3] {
        [self.hue, self.saturation, self.value]
    }
}

impl<T> LabColorFormat<T> {
    pub fn to_array(self) -> [T; 3] {
        [self.lightness, self.green_red, self.blue_yellow]
    }
}

impl<T> YCrCbColorFormat<T> {
    pub fn to_array(self) -> [T; 3] {
        [self.luma, self.chroma_red, self.chroma_blue]
    }
}

impl From<&BGRColorFormat<u8>> for RGBColorFormat<f32> {
    fn from(value: &BGRColorFormat<u8>) -> Self {
        RGBColorFormat {
            red: value.red as f32 / 255_f32,
            green: value.green as f32 / 255_f32,
            blue: value.blue as f32 / 255_f32,
        }
    }
}

fn saturate(value: f32) -> u8 {
    value.round().clamp(0_f32, 255_f32) as u8
}

impl From<&BGRColorFormat<u8>> for HSVColorFormat<u8> {
    fn from(value: &BGRColorFormat<u8>) -> Self {
        let red = value.red as f32;
        let green = value.green as f32;
        let blue = value.blue as f32;
        let max = red.max(green).max(blue);
        let min = red.min(green).min(blue);
        let delta = max - min;

        let saturation = if max == 0_f32 {
            0_f32
        } else {
            255_f32 * delta / max
        };
        let mut hue = if delta == 0_f32 {
            0_f32
        } else if max == red {
            60_f32 * (green - blue) / delta
        } else if max == green {
            120_f32 + 60_f32 * (blue - red) / delta
        } else {
            240_f32 + 60_f32 * (red - green) / delta
        };
        if hue < 0_f32 {
            hue += 360_f32;
        }
        let hue = saturate(hue / 2_f32) % 180;

        HSVColorFormat {
            hue,
            saturation: saturate(saturation),
            value: saturate(max),
        }
    }
}

const D65_WHITE_X: f32 = 0.950456;
const D65_WHITE_Z: f32 = 1.088754;
const LAB_EPSILON: f32 = 0.008856;

fn linearize_srgb(component: f32) -> f32 {
    if component <= 0.04045 {
        component / 12.92
    } else {
        ((component + 0.055) / 1.055).powf(2.4)
    }
}

fn lab_nonlinearity(t: f32) -> f32 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        7.787 * t + 16_f32 / 116_f32
    }
}

impl From<&RGBColorFormat<f32>> for LabColorFormat<f32> {
    fn from(value: &RGBColorFormat<f32>) -> Self {
        let red = linearize_srgb(value.red);
        let green = linearize_srgb(value.green);
        let blue = linearize_srgb(value.blue);

        let x = (0.412453 * red + 0.357580 * green + 0.180423 * blue) / D65_WHITE_X;
        let y = 0.212671 * red + 0.715160 * green + 0.072169 * blue;
        let z = (0.019334 * red + 0.119193 * green + 0.950227 * blue) / D65_WHITE_Z;

        let fx = lab_nonlinearity(x);
        let fy = lab_nonlinearity(y);
        let fz = lab_nonlinearity(z);
        let lightness = if y > LAB_EPSILON {
            116_f32 * fy - 16_f32
        } else {
            903.3 * y
        };

        LabColorFormat {
            lightness,
            green_red: 500_f32 * (fx - fy),
            blue_yellow: 200_f32 * (fy - fz),
        }
    }
}

impl From<&BGRColorFormat<u8>> for LabColorFormat<u8> {
    fn from(value: &BGRColorFormat<u8>) -> Self {
        let lab = LabColorFormat::<f32>::from(&RGBColorFormat::from(value));
        LabColorFormat {
            lightness: saturate(lab.lightness * 255_f32 / 100_f32),
            green_red: saturate(lab.green_red + 128_f32),
            blue_yellow: saturate(lab.blue_yellow + 128_f32),
        }
    }
}

impl From<&BGRColorFormat<u8>> for YCrCbColorFormat<u8> {
    fn from(value: &BGRColorFormat<u8>) -> Self {
        let red = value.red as f32;
        let green = value.green as f32;
        let blue = value.blue as f32;

        let luma = red * 0.299_f32 + green * 0.587_f32 + blue * 0.114_f32;
        let chroma_red = (red - luma) * 0.713_f32 + 128_f32;
        let chroma_blue = (blue - luma) * 0.564_f32 + 128_f32;

        YCrCbColorFormat {
            luma: saturate(luma),
            chroma_red: saturate(chroma_red),
            chroma_blue: saturate(chroma_blue),
        }
    }
}

/// Color representation used as clustering input.
///
/// Names that do not match any known space resolve to [`ColorSpace::Bgr`]
/// instead of failing, see [`ColorSpace::resolve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ColorSpace {
    #[default]
    Bgr,
    Hsv,
    Lab,
    YCrCb,
}

impl ColorSpace {
    /// Case-insensitive lookup, `ycc` being an alias of `ycrcb`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "bgr" => Some(Self::Bgr),
            "hsv" => Some(Self::Hsv),
            "lab" => Some(Self::Lab),
            "ycrcb" | "ycc" => Some(Self::YCrCb),
            _ => None,
        }
    }

    /// Like [`ColorSpace::from_name`], but unknown names fall back to BGR.
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            log::warn!(
                "Color space '{}' not recognized. Using color space {}",
                name,
                Self::Bgr
            );
            Self::Bgr
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bgr => "bgr",
            Self::Hsv => "hsv",
            Self::Lab => "lab",
            Self::YCrCb => "ycrcb",
        }
    }

    pub fn convert_pixel(&self, pixel: &BGRColorFormat<u8>) -> [u8; 3] {
        match self {
            Self::Bgr => pixel.to_array(),
            Self::Hsv => HSVColorFormat::from(pixel).to_array(),
            Self::Lab => LabColorFormat::<u8>::from(pixel).to_array(),
            Self::YCrCb => YCrCbColorFormat::from(pixel).to_array(),
        }
    }
}

impl Display for ColorSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
