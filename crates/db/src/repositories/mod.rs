pub mod adjustment_repo;
pub mod attendance_repo;
pub mod calendar_repo;
pub mod employee_repo;
pub mod leave_repo;
pub mod pay_profile_repo;
pub mod payroll_run_repo;
pub mod payslip_repo;
pub mod shift_template_repo;
pub mod statutory_repo;

pub use adjustment_repo::AdjustmentRepo;
pub use attendance_repo::AttendanceRepo;
pub use calendar_repo::CalendarRepo;
pub use employee_repo::EmployeeRepo;
pub use leave_repo::LeaveRepo;
pub use pay_profile_repo::PayProfileRepo;
pub use payroll_run_repo::{ApproveOutcome, PayPeriodRepo, PayrollRunRepo};
pub use payslip_repo::PayslipRepo;
pub use shift_template_repo::ShiftTemplateRepo;
pub use statutory_repo::StatutoryRepo;
