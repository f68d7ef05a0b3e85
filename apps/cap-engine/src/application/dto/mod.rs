//! Data Transfer Objects

mod cap_report_dto;

pub use cap_report_dto::{CapReportDto, ComplianceDto, ViolationDto};
