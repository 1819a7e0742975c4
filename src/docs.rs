use utoipa::OpenApi;

use crate::modules::ErrorResponse;
use crate::modules::common_students::model::CommonStudentsResponse;
use crate::modules::notifications::model::{RecipientsResponse, RetrieveForNotificationsDto};
use crate::modules::registration::model::RegisterStudentsDto;
use crate::modules::suspension::model::SuspendStudentDto;
use crate::router::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::router::health,
        crate::modules::registration::controller::register_students,
        crate::modules::common_students::controller::get_common_students,
        crate::modules::suspension::controller::suspend_student,
        crate::modules::notifications::controller::retrieve_for_notifications,
    ),
    components(
        schemas(
            RegisterStudentsDto,
            CommonStudentsResponse,
            SuspendStudentDto,
            RetrieveForNotificationsDto,
            RecipientsResponse,
            ErrorResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "Registration", description = "Register students to teachers"),
        (name = "Common Students", description = "Students shared by a set of teachers"),
        (name = "Suspension", description = "Student suspension"),
        (name = "Notifications", description = "Notification recipient resolution"),
        (name = "Health", description = "Service health")
    ),
    info(
        title = "Rollcall API",
        version = "0.1.0",
        description = "Teacher and student directory API: registrations, common students, suspensions and notification recipients.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
