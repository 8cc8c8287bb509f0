pub mod attendance;
pub mod leave;
pub mod leave_type;
pub mod user;
pub mod work_break;
