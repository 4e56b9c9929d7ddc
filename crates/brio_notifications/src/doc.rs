#![allow(dead_code)]
use utoipa::OpenApi;

use crate::models::{
    NotificationPayload, PushKeys, PushSubscription, SendRequest, SendResponse, SubscribeRequest,
    SubscribeResponse,
};

#[utoipa::path(
    post,
    path = "/notifications/send",
    request_body(content = SendRequest, example = json!({
        "envio_id": "42",
        "payload": { "title": "Actualización", "body": "Tu envío cambió de estado" }
    })),
    responses(
        (status = 201, description = "Notification accepted by the hub", body = SendResponse,
         example = json!({
             "status": 201,
             "reason": "Created",
             "text": "",
             "hub": "envios",
             "resource": "https://brio-ns.servicebus.windows.net/envios/messages"
         })
        ),
        (status = 400, description = "envio_id missing",
         example = json!({ "error": { "message": "Validation error: envio_id es requerido", "code": 400 } })
        ),
        (status = 401, description = "Hub rejected the token (status mirrored)", body = SendResponse),
        (status = 500, description = "Hub not configured"),
        (status = 502, description = "Hub unreachable", body = SendResponse)
    ),
    tag = "Notifications"
)]
fn doc_send_notification_handler() {}

#[utoipa::path(
    post,
    path = "/notifications/subscribe",
    request_body(content = SubscribeRequest, example = json!({
        "subscription": {
            "endpoint": "https://fcm.googleapis.com/fcm/send/dXZ0abc123",
            "keys": { "p256dh": "BNcRd...", "auth": "tBHI..." }
        },
        "tags": ["envio:42"]
    })),
    responses(
        (status = 200, description = "Installation stored", body = SubscribeResponse,
         example = json!({ "status": 200, "text": "" })
        ),
        (status = 400, description = "Suscripción incompleta"),
        (status = 500, description = "Hub not configured"),
        (status = 502, description = "Hub unreachable", body = SubscribeResponse)
    ),
    tag = "Notifications"
)]
fn doc_subscribe_handler() {}

#[utoipa::path(
    get,
    path = "/notifications/vapid-public",
    responses(
        (status = 200, description = "Public VAPID key", body = String,
         example = json!("BEl62iUYgUivxIkv69yViEuiBIa-Ib9-SkvMeAtA3LFgDzkrxZJjSgSnfckjBJuBkr3qBUYIHBQFLXYp5Nksh8U")
        ),
        (status = 500, description = "VAPID key not configured")
    ),
    tag = "Notifications"
)]
fn doc_vapid_public_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_send_notification_handler,
        doc_subscribe_handler,
        doc_vapid_public_handler,
    ),
    components(
        schemas(
            SendRequest,
            SendResponse,
            NotificationPayload,
            SubscribeRequest,
            SubscribeResponse,
            PushSubscription,
            PushKeys,
        )
    ),
    tags(
        (name = "Notifications", description = "Web push relay through the notification hub")
    )
)]
pub struct NotificationsApiDoc;
