// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};

use super::{list_page, page_footer};
use crate::config::Settings;
use crate::filter::Criteria;
use crate::models::Employee;
use crate::services::{DepartmentService, EmployeeService};
use crate::store::RecordStore;
use crate::utils::{fmt_amount, maybe_print_json, parse_amount, parse_date, parse_id, pretty_table};

pub fn handle<S: RecordStore>(store: &S, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let e = apply_args(Employee::default(), sub)?;
            let created = EmployeeService::new(store)
                .create(&e)?
                .ok_or_else(|| anyhow!("Employee was not created"))?;
            println!(
                "Added employee '{}' (id {})",
                created.name,
                created.id.unwrap_or_default()
            );
        }
        Some(("list", sub)) => list(store, settings, sub)?,
        Some(("update", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let svc = EmployeeService::new(store);
            let e = apply_args(svc.get(id)?, sub)?;
            if svc.update(id, &e)?.is_none() {
                return Err(anyhow!("Employee {} was not updated", id));
            }
            println!("Updated employee {}", id);
        }
        Some(("rm", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            if !EmployeeService::new(store).delete(id)? {
                return Err(anyhow!("Employee {} could not be removed", id));
            }
            println!("Removed employee {}", id);
        }
        _ => {}
    }
    Ok(())
}

/// Overlays the supplied flags. A new first or last name clears `name` so it is derived again.
pub fn apply_args(mut e: Employee, sub: &clap::ArgMatches) -> Result<Employee> {
    if let Some(v) = sub.get_one::<String>("first") {
        e.first_name = v.trim().to_string();
        e.name.clear();
    }
    if let Some(v) = sub.get_one::<String>("last") {
        e.last_name = v.trim().to_string();
        e.name.clear();
    }
    if let Some(v) = sub.get_one::<String>("code") {
        e.employee_code = v.trim().to_string();
    }
    if let Some(v) = sub.get_one::<String>("email") {
        e.email = v.trim().to_string();
    }
    if let Some(v) = sub.get_one::<String>("department") {
        e.department_id = Some(parse_id(v)?);
    }
    if let Some(v) = sub.get_one::<String>("joined") {
        e.join_date = Some(parse_date(v)?);
    }
    if let Some(v) = sub.get_one::<String>("salary") {
        e.salary = parse_amount(v)?;
    }
    Ok(e)
}

fn list<S: RecordStore>(store: &S, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let criteria = Criteria::new()
        .search(sub.get_one::<String>("search").cloned().unwrap_or_default())
        .matching_opt("department_id", sub.get_one::<String>("department"));
    let all = EmployeeService::new(store).all();
    let page = list_page(&all, &criteria, settings, sub);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &page)? {
        let departments = DepartmentService::new(store).names();
        let rows = page
            .items
            .iter()
            .map(|e| {
                let dept = e
                    .department_id
                    .map(|id| departments.get(&id).cloned().unwrap_or_else(|| id.to_string()))
                    .unwrap_or_default();
                vec![
                    e.id.map(|i| i.to_string()).unwrap_or_default(),
                    e.employee_code.clone(),
                    e.name.clone(),
                    e.email.clone(),
                    dept,
                    fmt_amount(e.salary),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Code", "Name", "Email", "Department", "Salary"], rows)
        );
        println!("{}", page_footer(&page));
    }
    Ok(())
}
