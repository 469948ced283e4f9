//! Image upload route - runs the pixelation pipeline

use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse, Responder};
use futures::StreamExt;
use tracing::{error, info};

use crate::config::UserConfig;
use crate::core::{codec, pipeline};
use crate::error::PixelError;
use crate::serializers;

/// POST /upload - pixelate an uploaded image at every configured block size
#[post("/upload")]
pub async fn upload_image(mut payload: Multipart) -> impl Responder {
    let mut file_bytes: Option<Vec<u8>> = None;

    while let Some(Ok(mut field)) = payload.next().await {
        let disp = field.content_disposition().clone();
        let name = disp.get_name().map(|s| s.to_string()).unwrap_or_default();

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(data) => bytes.extend_from_slice(&data),
                Err(_) => continue,
            }
        }

        if name == "file" {
            file_bytes = Some(bytes);
        }
    }

    let Some(bytes) = file_bytes.filter(|b| !b.is_empty()) else {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "no file uploaded"
        }));
    };

    let (block_sizes, options, max_image_pixels) = {
        let config = UserConfig::global();
        let config = config.read();
        (
            config.block_sizes.clone(),
            config.extract_options(),
            config.max_image_pixels,
        )
    };

    let buffer = match codec::decode(&bytes, max_image_pixels) {
        Ok(buffer) => buffer,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            }))
        }
    };

    info!(
        "processing {}x{} upload at {} block sizes",
        buffer.width(),
        buffer.height(),
        block_sizes.len()
    );

    let response = pipeline::run(&buffer, &block_sizes, &options)
        .and_then(|output| serializers::serialize_output(&output));

    match response {
        Ok(payload) => HttpResponse::Ok().json(payload),
        Err(e) => {
            error!("pipeline failed: {e}");
            let body = serde_json::json!({ "error": e.to_string() });
            match e {
                PixelError::Pipeline { .. } => HttpResponse::InternalServerError().json(body),
                _ => HttpResponse::BadRequest().json(body),
            }
        }
    }
}

/// Configure upload routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(upload_image);
}
