pub mod attendance;
pub mod calendar;
pub mod employee;
pub mod leave;
pub mod pay_profile;
pub mod payroll_run;
pub mod payslip;
pub mod shift_template;
pub mod statutory;
