pub mod attendance;
pub mod leave;
pub mod leave_type;
pub mod user;
pub mod work_break;

#[cfg(test)]
pub(crate) mod test_support;

pub use attendance::AttendanceService;
pub use leave::LeaveService;
pub use leave_type::LeaveTypeService;
pub use user::UserService;
pub use work_break::BreakService;
