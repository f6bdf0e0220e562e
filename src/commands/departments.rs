// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};

use super::{list_page, page_footer};
use crate::config::Settings;
use crate::filter::Criteria;
use crate::models::Department;
use crate::services::DepartmentService;
use crate::store::RecordStore;
use crate::utils::{maybe_print_json, parse_id, pretty_table};

pub fn handle<S: RecordStore>(store: &S, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    let svc = DepartmentService::new(store);
    match m.subcommand() {
        Some(("add", sub)) => {
            let d = apply_args(Department::default(), sub)?;
            let created = svc
                .create(&d)?
                .ok_or_else(|| anyhow!("Department was not created"))?;
            println!(
                "Added department '{}' (id {})",
                created.name,
                created.id.unwrap_or_default()
            );
        }
        Some(("list", sub)) => {
            let criteria =
                Criteria::new().search(sub.get_one::<String>("search").cloned().unwrap_or_default());
            let page = list_page(&svc.all(), &criteria, settings, sub);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &page)? {
                let rows = page
                    .items
                    .iter()
                    .map(|d| {
                        vec![
                            d.id.map(|i| i.to_string()).unwrap_or_default(),
                            d.department_code.clone(),
                            d.name.clone(),
                            d.location.clone(),
                            d.email.clone(),
                            d.phone_number.clone(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Id", "Code", "Name", "Location", "Email", "Phone"], rows)
                );
                println!("{}", page_footer(&page));
            }
        }
        Some(("update", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let d = apply_args(svc.get(id)?, sub)?;
            if svc.update(id, &d)?.is_none() {
                return Err(anyhow!("Department {} was not updated", id));
            }
            println!("Updated department {}", id);
        }
        Some(("rm", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            if !svc.delete(id)? {
                return Err(anyhow!("Department {} could not be removed", id));
            }
            println!("Removed department {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn apply_args(mut d: Department, sub: &clap::ArgMatches) -> Result<Department> {
    if let Some(v) = sub.get_one::<String>("name") {
        d.name = v.trim().to_string();
    }
    if let Some(v) = sub.get_one::<String>("code") {
        d.department_code = v.trim().to_string();
    }
    if let Some(v) = sub.get_one::<String>("description") {
        d.description = v.to_string();
    }
    if let Some(v) = sub.get_one::<String>("location") {
        d.location = v.trim().to_string();
    }
    if let Some(v) = sub.get_one::<String>("email") {
        d.email = v.trim().to_string();
    }
    if let Some(v) = sub.get_one::<String>("phone") {
        d.phone_number = v.trim().to_string();
    }
    if let Some(v) = sub.get_one::<String>("manager") {
        d.manager_id = Some(parse_id(v)?);
    }
    Ok(d)
}
