use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// Options for a new session, passed as a JavaScript object.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionOptions {
    pub pixel_scale: Option<u32>,
}

/// Options for `render`, passed as a JavaScript object.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    pub format: Option<String>,
    pub quality: Option<f32>,
}

/// A face box as reported by an external detector, normalized to 0–1 with
/// a bottom-left origin.
#[derive(Deserialize)]
pub struct BoxInput {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

fn string_to_format(format: &str) -> Result<faceblur::OutputFormat, JsValue> {
    match format {
        "png" => Ok(faceblur::OutputFormat::Png),
        "jpeg" => Ok(faceblur::OutputFormat::Jpeg),
        "webp" => Ok(faceblur::OutputFormat::Webp),
        _ => Err(make_error(
            "INVALID_OPTIONS",
            &format!("unknown format: {format}"),
        )),
    }
}

/// Create a JS `Error` with a `code` property.
fn make_error(code: &str, message: &str) -> JsValue {
    let err = js_sys::Error::new(message);
    let _ = js_sys::Reflect::set(&err, &"code".into(), &JsValue::from_str(code));
    JsValue::from(err)
}

/// Convert a `FaceBlurError` into a JS `Error` with a machine-readable `code` property.
fn to_js_error(e: faceblur::FaceBlurError) -> JsValue {
    use faceblur::FaceBlurError;

    let code = match &e {
        FaceBlurError::DetectionFailure(_) => "DETECTION_FAILURE",
        FaceBlurError::DimensionMismatch { .. } => "DIMENSION_MISMATCH",
        FaceBlurError::DecodeError(_) => "DECODE_ERROR",
        FaceBlurError::EncodeError(_) => "ENCODE_ERROR",
        FaceBlurError::ZeroDimensions => "ZERO_DIMENSIONS",
        FaceBlurError::InvalidPixelScale => "INVALID_PIXEL_SCALE",
        FaceBlurError::InvalidQuality(_) => "INVALID_QUALITY",
        FaceBlurError::RegionOutOfRange { .. } => "REGION_OUT_OF_RANGE",
        FaceBlurError::ModelLoad(_) => "MODEL_LOAD",
    };
    make_error(code, &e.to_string())
}

fn parse_options<T: for<'de> Deserialize<'de> + Default>(options: JsValue) -> Result<T, JsValue> {
    if options.is_undefined() || options.is_null() {
        Ok(T::default())
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| make_error("INVALID_OPTIONS", &format!("invalid options: {e}")))
    }
}

/// Build a plain JS array of `{x, y, width, height, active}` objects.
fn build_layout_array(
    rects: &[faceblur::Rect],
    regions: &faceblur::FaceRegions,
) -> Result<JsValue, JsValue> {
    let array = js_sys::Array::new();
    for (rect, region) in rects.iter().zip(regions.as_slice()) {
        let obj = js_sys::Object::new();
        js_sys::Reflect::set(&obj, &"x".into(), &JsValue::from(rect.x))?;
        js_sys::Reflect::set(&obj, &"y".into(), &JsValue::from(rect.y))?;
        js_sys::Reflect::set(&obj, &"width".into(), &JsValue::from(rect.width))?;
        js_sys::Reflect::set(&obj, &"height".into(), &JsValue::from(rect.height))?;
        js_sys::Reflect::set(&obj, &"active".into(), &JsValue::from(region.active))?;
        array.push(&obj);
    }
    Ok(JsValue::from(array))
}

/// One photo being edited in the browser.
///
/// Typical use: `importImage(bytes)`, then `layout(w, h)` whenever the view
/// size changes, `tap(x, y)` on clicks, and `render()` to get the output.
#[wasm_bindgen]
pub struct FaceBlur {
    session: faceblur::FaceBlurSession,
}

#[wasm_bindgen]
impl FaceBlur {
    /// @param options - Optional object with field: pixelScale (default 12)
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<FaceBlur, JsValue> {
        let opts: SessionOptions = parse_options(options)?;
        let mut session = faceblur::FaceBlurSession::new();
        if let Some(scale) = opts.pixel_scale {
            if scale == 0 {
                return Err(to_js_error(faceblur::FaceBlurError::InvalidPixelScale));
            }
            session = session.pixel_scale(scale);
        }
        Ok(FaceBlur { session })
    }

    /// Load a SeetaFace model so that imports detect faces.
    #[cfg(feature = "rustface")]
    #[wasm_bindgen(js_name = "loadModel")]
    pub fn load_model(&mut self, model: Vec<u8>) -> Result<(), JsValue> {
        let detector =
            faceblur::RustfaceDetector::from_reader(model.as_slice()).map_err(to_js_error)?;
        let session = std::mem::take(&mut self.session);
        self.session = session.face_detector(Box::new(detector));
        Ok(())
    }

    /// Import raw image bytes (JPEG, PNG, or WebP). Returns the face count.
    #[wasm_bindgen(js_name = "importImage")]
    pub fn import_image(&mut self, input: Vec<u8>) -> Result<u32, JsValue> {
        let count = self.session.import(&input).map_err(to_js_error)?;
        Ok(count as u32)
    }

    /// Replace the faces with boxes from another detector, e.g. an array of
    /// `{x, y, width, height}` normalized with a bottom-left origin.
    #[wasm_bindgen(js_name = "setFaces")]
    pub fn set_faces(&mut self, boxes: JsValue) -> Result<u32, JsValue> {
        let boxes: Vec<BoxInput> = serde_wasm_bindgen::from_value(boxes)
            .map_err(|e| make_error("INVALID_OPTIONS", &format!("invalid face boxes: {e}")))?;
        let boxes = boxes
            .into_iter()
            .map(|b| faceblur::NormalizedBox::new(b.x, b.y, b.width, b.height))
            .collect();
        Ok(self.session.set_regions(boxes) as u32)
    }

    /// Lay the faces out in a view of the given size and return their boxes.
    pub fn layout(&mut self, width: f64, height: f64) -> Result<JsValue, JsValue> {
        let rects = self
            .session
            .set_container(faceblur::Size::new(width, height));
        build_layout_array(&rects, self.session.regions())
    }

    /// Flip one face. Returns its new state, or `undefined` with no image.
    pub fn toggle(&mut self, index: usize) -> Result<Option<bool>, JsValue> {
        self.session.toggle(index).map_err(to_js_error)
    }

    /// Toggle the face under a click. Returns its index, or `undefined`.
    pub fn tap(&mut self, x: f64, y: f64) -> Option<u32> {
        self.session
            .tap(faceblur::Point::new(x, y))
            .map(|index| index as u32)
    }

    /// Render the photo with the active faces pixelated.
    ///
    /// @param options - Optional object with fields: format ("png", "jpeg",
    ///   "webp"; default "png"), quality (0–1, JPEG only; default 0.9)
    pub fn render(&self, options: JsValue) -> Result<Option<Vec<u8>>, JsValue> {
        let opts: RenderOptions = parse_options(options)?;
        let format = match opts.format.as_deref() {
            Some(f) => string_to_format(f)?,
            None => faceblur::OutputFormat::default(),
        };
        let quality = opts.quality.unwrap_or(0.9);
        self.session
            .render_encoded(&format, quality)
            .map_err(to_js_error)
    }
}
