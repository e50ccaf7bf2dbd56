use utoipa::OpenApi;

pub const REPORT_TAG: &str = "Reports";
pub const NOTIFICATION_TAG: &str = "Notifications";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Driver Relay",
        description = "Relays driver-issue reports to a chat webhook and broadcasts push notifications to the driver fleet",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::push::MulticastSummary,
        )
    ),
    tags(
        (name = REPORT_TAG, description = "Driver-issue report submission"),
        (name = NOTIFICATION_TAG, description = "Fleet push broadcast and history retention"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
