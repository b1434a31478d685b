pub fn render_schema() -> &'static str {
	include_str!("../sql/notes.sql")
}
