//! crates/frontdesk_core/src/employees.rs
//!
//! Staff records and payroll totals. Deactivating an employee removes them
//! from payroll while keeping the record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analytics::saturating_sum;
use crate::domain::{Employee, NewEmployee};
use crate::error::{require_phone_number, require_text, ServiceResult, ValidationError};
use crate::store::EntityStore;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePatch {
    pub name: Option<String>,
    pub designation: Option<String>,
    pub monthly_salary: Option<u64>,
    pub joining_date: Option<NaiveDate>,
    pub contact_number: Option<String>,
    pub is_active: Option<bool>,
}

/// Salary totals over active staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payroll {
    pub active_staff: usize,
    pub monthly_total: u64,
    pub average_salary: u64,
}

fn validate(employee: NewEmployee) -> Result<NewEmployee, ValidationError> {
    let name = require_text("name", &employee.name, "Name is required")?;
    let designation = require_text("designation", &employee.designation, "Designation is required")?;
    if employee.monthly_salary == 0 {
        return Err(ValidationError::new("monthlySalary", "Salary must be greater than 0"));
    }
    let contact_number = require_phone_number("contactNumber", &employee.contact_number)?;
    Ok(NewEmployee {
        name,
        designation,
        contact_number,
        ..employee
    })
}

#[derive(Clone)]
pub struct StaffRoster {
    store: EntityStore,
}

impl StaffRoster {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    pub async fn list_employees(&self) -> Vec<Employee> {
        self.store.list().await
    }

    pub async fn get_employee(&self, id: Uuid) -> Option<Employee> {
        self.store.get(id).await
    }

    pub async fn create_employee(&self, employee: NewEmployee) -> ServiceResult<Employee> {
        let employee: Employee = self.store.create(validate(employee)?).await;
        info!(employee_id = %employee.id, "Added employee");
        Ok(employee)
    }

    pub async fn update_employee(&self, id: Uuid, patch: EmployeePatch) -> ServiceResult<Option<Employee>> {
        let writer = self.store.writer().await;
        let Some(current) = writer.get::<Employee>(id).await else {
            return Ok(None);
        };
        let merged = validate(NewEmployee {
            name: patch.name.unwrap_or(current.name),
            designation: patch.designation.unwrap_or(current.designation),
            monthly_salary: patch.monthly_salary.unwrap_or(current.monthly_salary),
            joining_date: patch.joining_date.unwrap_or(current.joining_date),
            contact_number: patch.contact_number.unwrap_or(current.contact_number),
            is_active: patch.is_active.unwrap_or(current.is_active),
        })?;

        Ok(writer
            .update::<Employee, _>(id, move |employee| {
                employee.name = merged.name;
                employee.designation = merged.designation;
                employee.monthly_salary = merged.monthly_salary;
                employee.joining_date = merged.joining_date;
                employee.contact_number = merged.contact_number;
                employee.is_active = merged.is_active;
            })
            .await)
    }

    pub async fn toggle_active(&self, id: Uuid) -> Option<Employee> {
        let employee = self
            .store
            .update::<Employee, _>(id, |employee| employee.is_active = !employee.is_active)
            .await?;
        info!(employee_id = %id, is_active = employee.is_active, "Changed employee status");
        Some(employee)
    }

    pub async fn delete_employee(&self, id: Uuid) -> bool {
        self.store.delete::<Employee>(id).await
    }

    pub async fn payroll(&self) -> Payroll {
        let salaries: Vec<u64> = self
            .list_employees()
            .await
            .into_iter()
            .filter(|employee| employee.is_active)
            .map(|employee| employee.monthly_salary)
            .collect();
        let monthly_total = saturating_sum(salaries.iter().copied());
        Payroll {
            active_staff: salaries.len(),
            monthly_total,
            average_salary: monthly_total / salaries.len().max(1) as u64,
        }
    }
}
