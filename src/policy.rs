mod action_value_table;

pub use action_value_table::ActionValueTable;
