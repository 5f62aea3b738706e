use anyhow::Result;
use base64::{Engine, engine::general_purpose::STANDARD};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Recognition request body.
///
/// The image travels inline as a base64 data-URI; the fixed selectors request
/// simplified LaTeX output from the math+text recognition mode.
#[derive(Debug, Serialize)]
pub struct RecognitionRequest {
    pub src: String,
    pub formats: Vec<&'static str>,
    pub ocr: Vec<&'static str>,
}

impl RecognitionRequest {
    pub fn from_png(png: &[u8]) -> Self {
        Self {
            src: png_data_uri(png),
            formats: vec!["latex_simplified"],
            ocr: vec!["math", "text"],
        }
    }
}

/// Recognition response. All fields other than `latex_simplified` are ignored.
#[derive(Debug, Deserialize)]
pub struct RecognitionResponse {
    #[serde(default)]
    pub latex_simplified: Option<String>,
}

impl RecognitionResponse {
    /// The recognized LaTeX, or an empty string when the field is absent.
    pub fn into_latex(self) -> String {
        self.latex_simplified.unwrap_or_default()
    }
}

/// Embed PNG bytes in a `data:image/png;base64,...` URI.
pub fn png_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// Encode an RGBA pixel buffer as PNG into an in-memory byte buffer.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = std::io::Cursor::new(Vec::new());
    image.write_to(&mut buffer, image::ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::{RecognitionRequest, RecognitionResponse, encode_png, png_data_uri};

    #[test]
    fn request_body_matches_wire_format() {
        let request = RecognitionRequest::from_png(&[1, 2, 3]);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["src"], "data:image/png;base64,AQID");
        assert_eq!(json["formats"], serde_json::json!(["latex_simplified"]));
        assert_eq!(json["ocr"], serde_json::json!(["math", "text"]));
    }

    #[test]
    fn response_field_is_extracted_exactly() {
        let response: RecognitionResponse =
            serde_json::from_str(r#"{"latex_simplified": "x^2+y^2=z^2"}"#).unwrap();
        assert_eq!(response.into_latex(), "x^2+y^2=z^2");
    }

    #[test]
    fn missing_field_yields_empty_string() {
        let response: RecognitionResponse =
            serde_json::from_str(r#"{"text": "unrelated", "confidence": 0.9}"#).unwrap();
        assert_eq!(response.into_latex(), "");
    }

    #[test]
    fn data_uri_of_empty_payload_is_just_the_prefix() {
        assert_eq!(png_data_uri(&[]), "data:image/png;base64,");
    }

    #[test]
    fn encode_png_produces_a_png_header() {
        let image = image::RgbaImage::from_pixel(4, 3, image::Rgba([10, 20, 30, 255]));
        let png = encode_png(&image).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n']);
    }
}
