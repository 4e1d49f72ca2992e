use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use derive_more::From;
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};
use serde_json::json;

use crate::api::TicketRequest;

// Pixels per QR module.
const MODULE_SIZE: u32 = 4;

#[derive(Debug, From)]
enum EncodeError {
    Qr(qrcode::types::QrError),
    Image(image::ImageError),
}

/// Returns the order summary encoded as an inline PNG data URI, or
/// `None` when encoding fails. The receipt still renders without it.
pub fn data_uri(ticket: &TicketRequest) -> Option<String> {
    // Raw values on purpose: the code carries the order as received,
    // not the rounded display amounts.
    let payload = json!({
        "ticket_number": ticket.ticket_number,
        "commande_id": ticket.commande_id,
        "total": ticket.total,
    });

    match encode(&payload.to_string()) {
        Ok(uri) => Some(uri),
        Err(error) => {
            tracing::warn!("ticket QR code skipped: {error:?}");
            None
        }
    }
}

fn encode(data: &str) -> Result<String, EncodeError> {
    let code =
        QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M)?;
    let image = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_SIZE, MODULE_SIZE)
        .build();

    let mut png = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(image).write_to(&mut png, ImageFormat::Png)?;

    Ok(format!(
        "data:image/png;base64,{}",
        STANDARD.encode(png.into_inner())
    ))
}
