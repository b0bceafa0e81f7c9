const COMMANDS: &[&str] = &[
    "get_work_area",
    "get_bounds",
    "set_size",
    "set_position",
    "set_resizable",
    "set_click_through",
    "set_interactive_regions",
    "pointer_moved",
    "get_screen_source",
    "chat_send",
    "chat_clear",
    "settings_get",
    "settings_set",
];

fn main() {
    tauri_plugin::Builder::new(COMMANDS).build();
}
