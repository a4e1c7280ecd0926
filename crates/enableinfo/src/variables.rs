//! Host variable snapshot visible to enable-info expressions

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ast::Constant;

/// Document color mode as seen by a filter.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageMode {
    /// 1-bit bitmap
    Bitmap,
    /// 8-bit grayscale
    GrayScale,
    /// 8-bit palette
    Indexed,
    /// 8-bit RGB
    RGB,
    /// 8-bit CMYK
    CMYK,
    /// 8-bit HSL
    HSL,
    /// 8-bit HSB
    HSB,
    /// 8-bit multichannel
    Multichannel,
    /// 8-bit duotone
    Duotone,
    /// 8-bit Lab
    Lab,
    /// 16-bit grayscale
    Gray16,
    /// 16-bit RGB
    RGB48,
}

impl ImageMode {
    /// All modes, in declaration order.
    pub const ALL: [ImageMode; 12] = [
        ImageMode::Bitmap,
        ImageMode::GrayScale,
        ImageMode::Indexed,
        ImageMode::RGB,
        ImageMode::CMYK,
        ImageMode::HSL,
        ImageMode::HSB,
        ImageMode::Multichannel,
        ImageMode::Duotone,
        ImageMode::Lab,
        ImageMode::Gray16,
        ImageMode::RGB48,
    ];

    /// The mode string exposed as `PSHOP_ImageMode`.
    pub fn name(self) -> &'static str {
        match self {
            ImageMode::Bitmap => "BitmapMode",
            ImageMode::GrayScale => "GrayScaleMode",
            ImageMode::Indexed => "IndexedMode",
            ImageMode::RGB => "RGBMode",
            ImageMode::CMYK => "CMYKMode",
            ImageMode::HSL => "HSLMode",
            ImageMode::HSB => "HSBMode",
            ImageMode::Multichannel => "MultichannelMode",
            ImageMode::Duotone => "DuotoneMode",
            ImageMode::Lab => "LabMode",
            ImageMode::Gray16 => "Gray16Mode",
            ImageMode::RGB48 => "RGB48Mode",
        }
    }

    /// Bits per channel implied by the mode.
    pub fn depth(self) -> i32 {
        match self {
            ImageMode::Bitmap => 1,
            ImageMode::Gray16 | ImageMode::RGB48 => 16,
            _ => 8,
        }
    }

    /// Parse a mode string such as `"RGBMode"`, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ImageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The fixed set of host variable names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableName {
    /// `PSHOP_ImageMode`
    ImageMode,
    /// `PSHOP_ImageDepth`
    ImageDepth,
    /// `PSHOP_HasLayerMask`
    HasLayerMask,
    /// `PSHOP_HasSelectionMask`
    HasSelectionMask,
    /// `PSHOP_HasTransparencyMask`
    HasTransparencyMask,
    /// `PSHOP_NumTargetChannels`
    NumTargetChannels,
    /// `PSHOP_NumTrueChannels`
    NumTrueChannels,
    /// `PSHOP_IsTargetComposite`
    IsTargetComposite,
    /// `PSHOP_ImageWidth`
    ImageWidth,
    /// `PSHOP_ImageHeight`
    ImageHeight,
}

impl VariableName {
    /// All names, in declaration order.
    pub const ALL: [VariableName; 10] = [
        VariableName::ImageMode,
        VariableName::ImageDepth,
        VariableName::HasLayerMask,
        VariableName::HasSelectionMask,
        VariableName::HasTransparencyMask,
        VariableName::NumTargetChannels,
        VariableName::NumTrueChannels,
        VariableName::IsTargetComposite,
        VariableName::ImageWidth,
        VariableName::ImageHeight,
    ];

    /// Name as written in expressions.
    pub fn as_str(self) -> &'static str {
        match self {
            VariableName::ImageMode => "PSHOP_ImageMode",
            VariableName::ImageDepth => "PSHOP_ImageDepth",
            VariableName::HasLayerMask => "PSHOP_HasLayerMask",
            VariableName::HasSelectionMask => "PSHOP_HasSelectionMask",
            VariableName::HasTransparencyMask => "PSHOP_HasTransparencyMask",
            VariableName::NumTargetChannels => "PSHOP_NumTargetChannels",
            VariableName::NumTrueChannels => "PSHOP_NumTrueChannels",
            VariableName::IsTargetComposite => "PSHOP_IsTargetComposite",
            VariableName::ImageWidth => "PSHOP_ImageWidth",
            VariableName::ImageHeight => "PSHOP_ImageHeight",
        }
    }

    /// Match a variable name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|var| var.as_str().eq_ignore_ascii_case(name))
    }
}

/// Immutable snapshot of the host state a filter's expression can see.
///
/// Built once per enablement check by the host and passed by reference to
/// the evaluator. Equality and hashing are structural so callers can cache
/// verdicts per snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnableInfoVariables {
    image_width: i32,
    image_height: i32,
    image_mode: ImageMode,
    has_transparency: bool,
    target_channel_count: i32,
    true_channel_count: i32,
    has_selection: bool,
    is_composite: bool,
}

impl EnableInfoVariables {
    /// Build a snapshot.
    ///
    /// `has_multiple_layers` is inverted into `PSHOP_IsTargetComposite`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        image_width: i32,
        image_height: i32,
        image_mode: ImageMode,
        has_transparency: bool,
        target_channel_count: i32,
        true_channel_count: i32,
        has_selection: bool,
        has_multiple_layers: bool,
    ) -> Self {
        Self {
            image_width,
            image_height,
            image_mode,
            has_transparency,
            target_channel_count,
            true_channel_count,
            has_selection,
            is_composite: !has_multiple_layers,
        }
    }

    /// Image width in pixels.
    pub fn image_width(&self) -> i32 {
        self.image_width
    }

    /// Image height in pixels.
    pub fn image_height(&self) -> i32 {
        self.image_height
    }

    /// Color mode.
    pub fn image_mode(&self) -> ImageMode {
        self.image_mode
    }

    /// Bits per channel, derived from the mode.
    pub fn image_depth(&self) -> i32 {
        self.image_mode.depth()
    }

    /// Layer masks are never exposed by the host.
    pub fn has_layer_mask(&self) -> bool {
        false
    }

    /// Whether the session has an active selection.
    pub fn has_selection_mask(&self) -> bool {
        self.has_selection
    }

    /// Whether the target layer has transparency.
    pub fn has_transparency_mask(&self) -> bool {
        self.has_transparency
    }

    /// Number of channels the filter will be asked to process.
    pub fn target_channel_count(&self) -> i32 {
        self.target_channel_count
    }

    /// Number of color channels in the image.
    pub fn true_channel_count(&self) -> i32 {
        self.true_channel_count
    }

    /// True unless the document has multiple layers.
    pub fn is_target_composite(&self) -> bool {
        self.is_composite
    }

    /// Value bound to a known variable.
    pub fn get(&self, var: VariableName) -> Constant {
        match var {
            VariableName::ImageMode => Constant::string(self.image_mode.name()),
            VariableName::ImageDepth => Constant::Integer(self.image_depth()),
            VariableName::HasLayerMask => Constant::Boolean(self.has_layer_mask()),
            VariableName::HasSelectionMask => Constant::Boolean(self.has_selection),
            VariableName::HasTransparencyMask => Constant::Boolean(self.has_transparency),
            VariableName::NumTargetChannels => Constant::Integer(self.target_channel_count),
            VariableName::NumTrueChannels => Constant::Integer(self.true_channel_count),
            VariableName::IsTargetComposite => Constant::Boolean(self.is_composite),
            VariableName::ImageWidth => Constant::Integer(self.image_width),
            VariableName::ImageHeight => Constant::Integer(self.image_height),
        }
    }

    /// Resolve a name as written in an expression.
    ///
    /// Unknown names yield [`Constant::UndefinedVariable`] carrying the name.
    pub fn lookup(&self, name: &str) -> Constant {
        match VariableName::from_name(name) {
            Some(var) => self.get(var),
            None => Constant::UndefinedVariable(name.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_document() -> EnableInfoVariables {
        EnableInfoVariables::new(640, 480, ImageMode::RGB, true, 4, 3, false, false)
    }

    #[test]
    fn test_mode_names_and_depths() {
        assert_eq!(ImageMode::Bitmap.name(), "BitmapMode");
        assert_eq!(ImageMode::Bitmap.depth(), 1);
        assert_eq!(ImageMode::Lab.depth(), 8);
        assert_eq!(ImageMode::Duotone.depth(), 8);
        assert_eq!(ImageMode::Gray16.depth(), 16);
        assert_eq!(ImageMode::RGB48.depth(), 16);
        assert_eq!(ImageMode::RGB48.to_string(), "RGB48Mode");
    }

    #[test]
    fn test_mode_from_name() {
        for mode in ImageMode::ALL {
            assert_eq!(ImageMode::from_name(mode.name()), Some(mode));
        }
        assert_eq!(ImageMode::from_name("rgbmode"), Some(ImageMode::RGB));
        assert_eq!(ImageMode::from_name("RGB"), None);
    }

    #[test]
    fn test_lookup_every_variable() {
        let vars = rgb_document();
        assert_eq!(vars.lookup("PSHOP_ImageMode"), Constant::string("RGBMode"));
        assert_eq!(vars.lookup("PSHOP_ImageDepth"), Constant::Integer(8));
        assert_eq!(vars.lookup("PSHOP_HasLayerMask"), Constant::Boolean(false));
        assert_eq!(vars.lookup("PSHOP_HasSelectionMask"), Constant::Boolean(false));
        assert_eq!(vars.lookup("PSHOP_HasTransparencyMask"), Constant::Boolean(true));
        assert_eq!(vars.lookup("PSHOP_NumTargetChannels"), Constant::Integer(4));
        assert_eq!(vars.lookup("PSHOP_NumTrueChannels"), Constant::Integer(3));
        assert_eq!(vars.lookup("PSHOP_IsTargetComposite"), Constant::Boolean(true));
        assert_eq!(vars.lookup("PSHOP_ImageWidth"), Constant::Integer(640));
        assert_eq!(vars.lookup("PSHOP_ImageHeight"), Constant::Integer(480));
    }

    #[test]
    fn test_lookup_ignores_case() {
        let vars = rgb_document();
        assert_eq!(vars.lookup("pshop_imagewidth"), Constant::Integer(640));
        assert_eq!(vars.lookup("PSHOP_IMAGEMODE"), Constant::string("RGBMode"));
    }

    #[test]
    fn test_lookup_unknown_is_undefined() {
        let vars = rgb_document();
        assert_eq!(
            vars.lookup("PSHOP_NoSuchVar"),
            Constant::UndefinedVariable("PSHOP_NoSuchVar".to_string())
        );
    }

    #[test]
    fn test_multiple_layers_clear_composite() {
        let vars = EnableInfoVariables::new(1, 1, ImageMode::GrayScale, false, 1, 1, true, true);
        assert!(!vars.is_target_composite());
        assert!(vars.has_selection_mask());
        assert!(!vars.has_layer_mask());
    }

    #[test]
    fn test_structural_equality() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(rgb_document());
        assert!(set.contains(&rgb_document()));
        assert_ne!(
            rgb_document(),
            EnableInfoVariables::new(640, 480, ImageMode::CMYK, true, 4, 3, false, false)
        );
    }
}
