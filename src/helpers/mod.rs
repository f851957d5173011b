pub mod grid;
pub mod nom;

use std::fs;
use std::path::Path;

pub fn get_data_from_file_res(name: &str) -> std::io::Result<String> {
    let path = format!("data/{}.txt", name);
    fs::read_to_string(path)
}

pub fn get_data_from_path_res<P: AsRef<Path>>(path: P) -> std::io::Result<String> {
    fs::read_to_string(path)
}
