// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn list_args(cmd: Command) -> Command {
    json_args(
        cmd.arg(
            Arg::new("search")
                .long("search")
                .short('s')
                .help("Case-insensitive substring over the searchable fields"),
        )
        .arg(Arg::new("sort").long("sort").help("Field to sort by"))
        .arg(
            Arg::new("desc")
                .long("desc")
                .action(ArgAction::SetTrue)
                .help("Sort descending"),
        )
        .arg(
            Arg::new("page")
                .long("page")
                .value_parser(value_parser!(usize))
                .default_value("1"),
        )
        .arg(
            Arg::new("page-size")
                .long("page-size")
                .value_parser(value_parser!(usize))
                .help("Items per page (defaults to the page_size setting)"),
        ),
    )
}

fn id_arg() -> Arg {
    Arg::new("id").long("id").required(true)
}

fn txn_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(Arg::new("date").long("date").help("YYYY-MM-DD"))
        .arg(Arg::new("amount").long("amount").required(required))
        .arg(
            Arg::new("type")
                .long("type")
                .value_parser(["income", "expense"]),
        )
        .arg(Arg::new("category").long("category"))
        .arg(Arg::new("description").long("description").required(required))
        .arg(Arg::new("notes").long("notes"))
        .arg(Arg::new("order").long("order").help("Related order id"))
}

fn product_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(Arg::new("name").long("name").required(required))
        .arg(Arg::new("sku").long("sku"))
        .arg(Arg::new("description").long("description"))
        .arg(Arg::new("category").long("category"))
        .arg(Arg::new("price").long("price").required(required))
        .arg(Arg::new("cost").long("cost"))
        .arg(
            Arg::new("stock")
                .long("stock")
                .value_parser(value_parser!(i64)),
        )
        .arg(
            Arg::new("reorder")
                .long("reorder")
                .value_parser(value_parser!(i64)),
        )
        .arg(Arg::new("unit").long("unit"))
}

fn employee_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(Arg::new("first").long("first").required(required))
        .arg(Arg::new("last").long("last").required(required))
        .arg(Arg::new("code").long("code"))
        .arg(Arg::new("email").long("email"))
        .arg(Arg::new("department").long("department").help("Department id"))
        .arg(Arg::new("joined").long("joined").help("YYYY-MM-DD"))
        .arg(Arg::new("salary").long("salary"))
}

fn department_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(Arg::new("name").long("name").required(required))
        .arg(Arg::new("code").long("code"))
        .arg(Arg::new("description").long("description"))
        .arg(Arg::new("location").long("location"))
        .arg(Arg::new("email").long("email"))
        .arg(Arg::new("phone").long("phone"))
        .arg(Arg::new("manager").long("manager").help("Manager employee id"))
}

fn categories_cmd() -> Command {
    json_args(Command::new("categories").about("Distinct categories in use"))
}

pub fn build_cli() -> Command {
    Command::new("ledgerdesk")
        .version(clap::crate_version!())
        .about("ERP records, cash flow and margin reports")
        .subcommand(Command::new("init").about("Create the local record store"))
        .subcommand(
            Command::new("tx")
                .about("Financial transactions")
                .subcommand(txn_fields(Command::new("add"), true))
                .subcommand(list_args(
                    Command::new("list")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("category").long("category")),
                ))
                .subcommand(txn_fields(Command::new("update").arg(id_arg()), false))
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(categories_cmd())
                .subcommand(json_args(Command::new("summary")))
                .subcommand(json_args(
                    Command::new("recent").arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize))
                            .default_value("10"),
                    ),
                )),
        )
        .subcommand(
            Command::new("product")
                .about("Inventory products")
                .subcommand(product_fields(Command::new("add"), true))
                .subcommand(list_args(
                    Command::new("list")
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("status")
                                .long("status")
                                .value_parser(["in-stock", "low-stock", "out-of-stock"]),
                        ),
                ))
                .subcommand(product_fields(Command::new("update").arg(id_arg()), false))
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(categories_cmd())
                .subcommand(json_args(Command::new("low-stock"))),
        )
        .subcommand(
            Command::new("employee")
                .about("Employees")
                .subcommand(employee_fields(Command::new("add"), true))
                .subcommand(list_args(
                    Command::new("list").arg(Arg::new("department").long("department")),
                ))
                .subcommand(employee_fields(Command::new("update").arg(id_arg()), false))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("department")
                .about("Departments")
                .subcommand(department_fields(Command::new("add"), true))
                .subcommand(list_args(Command::new("list")))
                .subcommand(department_fields(Command::new("update").arg(id_arg()), false))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("report")
                .about("Financial reports")
                .subcommand(json_args(
                    Command::new("cashflow").arg(
                        Arg::new("year")
                            .long("year")
                            .value_parser(value_parser!(i32)),
                    ),
                ))
                .subcommand(json_args(Command::new("expenses")))
                .subcommand(json_args(
                    Command::new("margins")
                        .arg(
                            Arg::new("top")
                                .long("top")
                                .value_parser(value_parser!(usize))
                                .help("Only the N most profitable products"),
                        )
                        .arg(
                            Arg::new("below")
                                .long("below")
                                .value_parser(value_parser!(f64))
                                .conflicts_with("top")
                                .help("Only products with margin below this percent"),
                        ),
                ))
                .subcommand(json_args(Command::new("category-profit"))),
        )
        .subcommand(
            Command::new("import").subcommand(
                Command::new("transactions").arg(Arg::new("path").long("path").required(true)),
            ),
        )
        .subcommand(
            Command::new("export").subcommand(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(
            Command::new("config")
                .about("Persistent settings")
                .subcommand(json_args(Command::new("get")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").long("key").required(true))
                        .arg(Arg::new("value").long("value").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Report records with missing or unusable data"))
}
