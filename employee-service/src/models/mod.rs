mod employee;

pub use employee::Employee;
