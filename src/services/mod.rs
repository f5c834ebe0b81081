pub mod my_list;

pub use my_list::ListService;
