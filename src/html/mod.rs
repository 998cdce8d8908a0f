//! HTML5 element and attribute classification tables.
//!
//! Constant lookup data consulted by the serializer and the tree builder:
//!
//! - void elements, which never get a closing tag
//! - raw text elements, whose text children are written without escaping
//! - SVG and MathML canonical casing for element and attribute names
//!
//! Names are matched in their lowercase form, the way an HTML tokenizer
//! stores them. A name that is already canonical (or unknown) is returned
//! unchanged by the `normalize_*` functions.

pub mod entities;

/// The root element of the SVG dialect.
pub const SVG_ROOT: &str = "svg";

/// The root element of the MathML dialect.
pub const MATHML_ROOT: &str = "math";

/// Returns true if `tag` (lowercase) is a void element.
#[must_use]
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "basefont"
            | "bgsound"
            | "br"
            | "col"
            | "embed"
            | "frame"
            | "hr"
            | "img"
            | "input"
            | "keygen"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Returns true if `tag` (lowercase) is an element whose text content is
/// written verbatim.
#[must_use]
pub fn is_raw_text_element(tag: &str) -> bool {
    matches!(
        tag,
        "style" | "script" | "xmp" | "iframe" | "noembed" | "noframes" | "plaintext"
    )
}

/// Maps a lowercase SVG attribute name to its canonical casing.
#[must_use]
pub fn normalize_svg_attribute(name: &str) -> &str {
    canonical_svg_attribute(name).unwrap_or(name)
}

/// Maps a lowercase MathML attribute name to its canonical casing.
#[must_use]
pub fn normalize_mathml_attribute(name: &str) -> &str {
    canonical_mathml_attribute(name).unwrap_or(name)
}

/// Returns the canonical spelling of an SVG element whose lowercase form
/// differs from it.
#[must_use]
pub fn canonical_svg_element(name: &str) -> Option<&'static str> {
    let canonical = match name {
        "altglyph" => "altGlyph",
        "altglyphdef" => "altGlyphDef",
        "altglyphitem" => "altGlyphItem",
        "animatecolor" => "animateColor",
        "animatemotion" => "animateMotion",
        "animatetransform" => "animateTransform",
        "clippath" => "clipPath",
        "feblend" => "feBlend",
        "fecolormatrix" => "feColorMatrix",
        "fecomponenttransfer" => "feComponentTransfer",
        "fecomposite" => "feComposite",
        "feconvolvematrix" => "feConvolveMatrix",
        "fediffuselighting" => "feDiffuseLighting",
        "fedisplacementmap" => "feDisplacementMap",
        "fedistantlight" => "feDistantLight",
        "fedropshadow" => "feDropShadow",
        "feflood" => "feFlood",
        "fefunca" => "feFuncA",
        "fefuncb" => "feFuncB",
        "fefuncg" => "feFuncG",
        "fefuncr" => "feFuncR",
        "fegaussianblur" => "feGaussianBlur",
        "feimage" => "feImage",
        "femerge" => "feMerge",
        "femergenode" => "feMergeNode",
        "femorphology" => "feMorphology",
        "feoffset" => "feOffset",
        "fepointlight" => "fePointLight",
        "fespecularlighting" => "feSpecularLighting",
        "fespotlight" => "feSpotLight",
        "fetile" => "feTile",
        "feturbulence" => "feTurbulence",
        "foreignobject" => "foreignObject",
        "glyphref" => "glyphRef",
        "lineargradient" => "linearGradient",
        "radialgradient" => "radialGradient",
        "textpath" => "textPath",
        _ => return None,
    };
    Some(canonical)
}

/// Returns the canonical spelling of an SVG attribute whose lowercase form
/// differs from it.
#[must_use]
pub fn canonical_svg_attribute(name: &str) -> Option<&'static str> {
    let canonical = match name {
        "attributename" => "attributeName",
        "attributetype" => "attributeType",
        "basefrequency" => "baseFrequency",
        "baseprofile" => "baseProfile",
        "calcmode" => "calcMode",
        "clippathunits" => "clipPathUnits",
        "diffuseconstant" => "diffuseConstant",
        "edgemode" => "edgeMode",
        "filterunits" => "filterUnits",
        "glyphref" => "glyphRef",
        "gradienttransform" => "gradientTransform",
        "gradientunits" => "gradientUnits",
        "kernelmatrix" => "kernelMatrix",
        "kernelunitlength" => "kernelUnitLength",
        "keypoints" => "keyPoints",
        "keysplines" => "keySplines",
        "keytimes" => "keyTimes",
        "lengthadjust" => "lengthAdjust",
        "limitingconeangle" => "limitingConeAngle",
        "markerheight" => "markerHeight",
        "markerunits" => "markerUnits",
        "markerwidth" => "markerWidth",
        "maskcontentunits" => "maskContentUnits",
        "maskunits" => "maskUnits",
        "numoctaves" => "numOctaves",
        "pathlength" => "pathLength",
        "patterncontentunits" => "patternContentUnits",
        "patterntransform" => "patternTransform",
        "patternunits" => "patternUnits",
        "pointsatx" => "pointsAtX",
        "pointsaty" => "pointsAtY",
        "pointsatz" => "pointsAtZ",
        "preservealpha" => "preserveAlpha",
        "preserveaspectratio" => "preserveAspectRatio",
        "primitiveunits" => "primitiveUnits",
        "refx" => "refX",
        "refy" => "refY",
        "repeatcount" => "repeatCount",
        "repeatdur" => "repeatDur",
        "requiredextensions" => "requiredExtensions",
        "requiredfeatures" => "requiredFeatures",
        "specularconstant" => "specularConstant",
        "specularexponent" => "specularExponent",
        "spreadmethod" => "spreadMethod",
        "startoffset" => "startOffset",
        "stddeviation" => "stdDeviation",
        "stitchtiles" => "stitchTiles",
        "surfacescale" => "surfaceScale",
        "systemlanguage" => "systemLanguage",
        "tablevalues" => "tableValues",
        "targetx" => "targetX",
        "targety" => "targetY",
        "textlength" => "textLength",
        "viewbox" => "viewBox",
        "viewtarget" => "viewTarget",
        "xchannelselector" => "xChannelSelector",
        "ychannelselector" => "yChannelSelector",
        "zoomandpan" => "zoomAndPan",
        _ => return None,
    };
    Some(canonical)
}

/// Returns the canonical spelling of a MathML attribute whose lowercase form
/// differs from it.
#[must_use]
pub fn canonical_mathml_attribute(name: &str) -> Option<&'static str> {
    match name {
        "definitionurl" => Some("definitionURL"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_elements() {
        for tag in ["br", "img", "input", "meta", "wbr", "keygen"] {
            assert!(is_void_element(tag), "{tag} should be void");
        }
        for tag in ["div", "p", "script", "svg", "BR"] {
            assert!(!is_void_element(tag), "{tag} should not be void");
        }
    }

    #[test]
    fn test_raw_text_elements() {
        assert!(is_raw_text_element("script"));
        assert!(is_raw_text_element("style"));
        assert!(is_raw_text_element("xmp"));
        assert!(!is_raw_text_element("textarea"));
        assert!(!is_raw_text_element("title"));
    }

    #[test]
    fn test_svg_element_casing() {
        assert_eq!(canonical_svg_element("foreignobject"), Some("foreignObject"));
        assert_eq!(canonical_svg_element("lineargradient"), Some("linearGradient"));
        assert_eq!(canonical_svg_element("svg"), None);
        assert_eq!(canonical_svg_element("foreignObject"), None);
    }

    #[test]
    fn test_svg_attribute_casing() {
        assert_eq!(normalize_svg_attribute("viewbox"), "viewBox");
        assert_eq!(
            normalize_svg_attribute("preserveaspectratio"),
            "preserveAspectRatio"
        );
        assert_eq!(normalize_svg_attribute("fill"), "fill");
        assert_eq!(normalize_svg_attribute("href"), "href");
    }

    #[test]
    fn test_mathml_attribute_casing() {
        assert_eq!(normalize_mathml_attribute("definitionurl"), "definitionURL");
        assert_eq!(normalize_mathml_attribute("viewbox"), "viewbox");
    }

    #[test]
    fn test_canonical_lookup_misses() {
        assert_eq!(canonical_svg_element("circle"), None);
        assert_eq!(canonical_svg_attribute("viewBox"), None);
        assert_eq!(canonical_mathml_attribute("display"), None);
    }
}
