use crate::api::attendance::{
    AttendanceResponse, CheckRequest, CreateAttendanceRequest, UpdateAttendanceRequest,
};
use crate::api::leave::{LeaveRequest, RejectLeaveRequest};
use crate::api::leave_type::LeaveTypeUsage;
use crate::api::user::UpdateUserRequest;
use crate::api::work_break::{CreateBreakRequest, EndBreakRequest, UpdateBreakRequest};
use crate::auth::handlers::{LoginRequest, RegisterRequest, TokenPairResponse};
use crate::model::attendance::{Attendance, AttendanceStatus};
use crate::model::leave::{Leave, LeaveStatus, LeaveTypeName};
use crate::model::leave_type::{LeaveType, NewLeaveType};
use crate::model::user::User;
use crate::model::work_break::Break;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{openapi, Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRM Attendance & Leave API",
        version = "1.0.0",
        description = r#"
## Human Resource Management — attendance and leave service

Tracks daily presence and manages the leave workflow for an organization.

### Key features
- **Attendance** — daily check-in/check-out with derived status and
  work hours net of breaks
- **Breaks** — start/end pauses inside a day; one open break at a time
- **Leave** — request, approve, reject, and cancel leaves with per-type
  annual balances
- **Leave type catalog** — configurable categories with default
  entitlements

### Security
All `/api/v1` endpoints require **JWT Bearer authentication**; obtain a
token pair via `/auth/signup` and `/auth/signin`.
"#,
    ),
    paths(
        crate::auth::handlers::register,
        crate::auth::handlers::login,
        crate::auth::handlers::refresh_token,
        crate::auth::handlers::logout,
        crate::auth::handlers::me,

        crate::api::user::list_users,
        crate::api::user::get_user,
        crate::api::user::update_user,
        crate::api::user::delete_user,

        crate::api::attendance::create_attendance,
        crate::api::attendance::check_in,
        crate::api::attendance::check_out,
        crate::api::attendance::list_attendance,
        crate::api::attendance::get_attendance,
        crate::api::attendance::update_attendance,
        crate::api::attendance::delete_attendance,
        crate::api::attendance::get_user_attendance,
        crate::api::attendance::get_user_attendance_range,
        crate::api::attendance::get_recent_attendance,

        crate::api::work_break::create_break,
        crate::api::work_break::end_break,
        crate::api::work_break::get_break,
        crate::api::work_break::list_breaks,
        crate::api::work_break::get_breaks_by_attendance,
        crate::api::work_break::update_break,
        crate::api::work_break::delete_break,

        crate::api::leave::create_leave,
        crate::api::leave::list_leaves,
        crate::api::leave::list_pending_leaves,
        crate::api::leave::get_leave,
        crate::api::leave::update_leave,
        crate::api::leave::delete_leave,
        crate::api::leave::approve_leave,
        crate::api::leave::reject_leave,
        crate::api::leave::cancel_leave,
        crate::api::leave::get_user_leaves,
        crate::api::leave::get_user_leaves_by_range,
        crate::api::leave::get_user_leave_balance,

        crate::api::leave_type::create_leave_type,
        crate::api::leave_type::list_leave_types,
        crate::api::leave_type::list_active_leave_types,
        crate::api::leave_type::leave_type_stats,
        crate::api::leave_type::get_leave_type_by_code,
        crate::api::leave_type::get_leave_type,
        crate::api::leave_type::update_leave_type,
        crate::api::leave_type::delete_leave_type,
    ),
    components(
        schemas(
            User,
            UpdateUserRequest,
            RegisterRequest,
            LoginRequest,
            TokenPairResponse,
            Attendance,
            AttendanceStatus,
            AttendanceResponse,
            CreateAttendanceRequest,
            CheckRequest,
            UpdateAttendanceRequest,
            Break,
            CreateBreakRequest,
            EndBreakRequest,
            UpdateBreakRequest,
            Leave,
            LeaveStatus,
            LeaveTypeName,
            LeaveRequest,
            RejectLeaveRequest,
            LeaveType,
            NewLeaveType,
            LeaveTypeUsage,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration, login, token refresh"),
        (name = "Users", description = "User directory APIs"),
        (name = "Attendance", description = "Daily check-in/check-out APIs"),
        (name = "Breaks", description = "Break tracking APIs"),
        (name = "Leaves", description = "Leave workflow APIs"),
        (name = "Leave Types", description = "Leave type catalog APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
