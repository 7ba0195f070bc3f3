use std::path::PathBuf;

use nametag::TagTable;

pub(crate) fn name_prefix_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/name_prefix.tbl")
}

pub(crate) fn name_prefix_table() -> TagTable {
    TagTable::load(name_prefix_path()).unwrap()
}

pub(crate) fn get_test_names() -> Vec<String> {
    [
        "maria della rosa",
        "Anna VAN DER Berg",
        "peter mac donald",
        "j de la cruz",
        "sean o neil",
        "ludwig von beethoven",
        "vd merwe , pieter",
        "st john - smith",
        "abu bakr",
        "karl zu 2",
    ]
    .iter()
    .map(|name| name.to_string())
    .collect::<Vec<_>>()
}
