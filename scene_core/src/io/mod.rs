pub mod io_interface;
