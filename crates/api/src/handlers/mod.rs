pub mod adjustments;
pub mod attendance;
pub mod calendars;
pub mod employees;
pub mod leaves;
pub mod pay_profiles;
pub mod payroll;
pub mod shift_templates;
pub mod statutory;
