use std::path::Path;

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use common::config::AppConfig;
use common::errors::AppError;

use crate::api::upload::{self, MultipartIntake};
use crate::service::{CreateRoomInput, RoomService};

use super::error_response;

const MAX_ROOM_IMAGES: usize = 10;

pub async fn create_room(
    config: web::Data<AppConfig>,
    room_service: web::Data<RoomService>,
    category_id: web::Path<String>,
    payload: Multipart,
) -> impl Responder {
    let intake =
        match upload::receive(payload, Path::new(&config.upload_dir), MAX_ROOM_IMAGES).await {
            Ok(intake) => intake,
            Err(e) => return error_response(e),
        };

    let input = match room_input(&intake) {
        Ok(input) => input,
        Err(e) => return error_response(e),
    };

    match room_service
        .create_room(&category_id, input, intake.files)
        .await
    {
        Ok(room) => HttpResponse::Ok().json(json!({
            "message": "room added successfully",
            "data": room
        })),
        Err(e) => error_response(e),
    }
}

pub async fn delete_room_image(
    room_service: web::Data<RoomService>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (room_id, image_id) = path.into_inner();

    match room_service.delete_image(&room_id, &image_id).await {
        Ok(room) => HttpResponse::Ok().json(json!({
            "message": "Room image deleted successfully",
            "data": room
        })),
        Err(e) => error_response(e),
    }
}

pub async fn update_room_image(
    config: web::Data<AppConfig>,
    room_service: web::Data<RoomService>,
    path: web::Path<(String, String)>,
    payload: Multipart,
) -> impl Responder {
    let (room_id, image_id) = path.into_inner();

    let mut intake = match upload::receive(payload, Path::new(&config.upload_dir), 1).await {
        Ok(intake) => intake,
        Err(e) => return error_response(e),
    };

    if intake.files.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "message": "No image uploaded" }));
    }
    let file = intake.files.remove(0);

    match room_service.replace_image(&room_id, &image_id, file).await {
        Ok(room) => HttpResponse::Ok().json(json!({
            "message": "Image updated successfully",
            "data": room
        })),
        Err(e) => error_response(e),
    }
}

// Malformed or missing form fields surface as a generic server error, which
// is what the public contract for room creation exposes.
fn room_input(intake: &MultipartIntake) -> Result<CreateRoomInput, AppError> {
    let field = |name: &str| {
        intake
            .fields
            .get(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                tracing::error!("Missing room field: {}", name);
                AppError::Internal
            })
    };

    let price = field("price")?.parse::<f64>().map_err(|_| {
        tracing::error!("Room price is not a number");
        AppError::Internal
    })?;
    if price < 0.0 {
        tracing::error!("Room price is negative");
        return Err(AppError::Internal);
    }

    Ok(CreateRoomInput {
        room_name: field("roomName")?,
        room_number: field("roomNumber")?,
        description: field("description")?,
        price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intake(entries: &[(&str, &str)]) -> MultipartIntake {
        MultipartIntake {
            fields: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            files: Vec::new(),
        }
    }

    fn full_form() -> MultipartIntake {
        intake(&[
            ("roomName", "Deluxe"),
            ("price", "150"),
            ("roomNumber", "101A"),
            ("description", "A luxurious suite with ocean view."),
        ])
    }

    #[test]
    fn room_input_parses_a_complete_form() {
        let input = room_input(&full_form()).unwrap();

        assert_eq!(input.room_name, "Deluxe");
        assert_eq!(input.room_number, "101A");
        assert_eq!(input.price, 150.0);
    }

    #[test]
    fn room_input_rejects_missing_fields() {
        let mut form = full_form();
        form.fields.remove("roomNumber");

        assert!(room_input(&form).is_err());
    }

    #[test]
    fn room_input_rejects_non_numeric_or_negative_prices() {
        let mut form = full_form();
        form.fields.insert("price".to_string(), "expensive".to_string());
        assert!(room_input(&form).is_err());

        form.fields.insert("price".to_string(), "-5".to_string());
        assert!(room_input(&form).is_err());
    }

    #[test]
    fn room_input_ignores_unknown_fields() {
        let mut form = full_form();
        form.fields
            .insert("wifiPassword".to_string(), "hunter2".to_string());

        assert!(room_input(&form).is_ok());
    }
}
