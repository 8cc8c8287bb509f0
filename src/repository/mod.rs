pub mod attendance;
pub mod leave;
pub mod leave_type;
pub mod user;
pub mod work_break;

pub use attendance::{AttendanceRepository, MySqlAttendanceRepository};
pub use leave::{LeaveRepository, MySqlLeaveRepository};
pub use leave_type::{LeaveTypeRepository, MySqlLeaveTypeRepository};
pub use user::{MySqlUserRepository, UserRepository};
pub use work_break::{BreakRepository, MySqlBreakRepository};
