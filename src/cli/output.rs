//! Status lines printed at the end of a run

use crossterm::style::Stylize;

/// Print a green `✓` line to stdout
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message.green());
}

/// Print a red `✗` line to stderr
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.red());
}

/// Print the commands that get a fresh project running
pub fn print_next_steps(project_name: &str) {
    println!();
    println!("Next steps:");
    for step in next_steps(project_name) {
        println!("  {}", step.as_str().cyan());
    }
}

/// Commands suggested after a successful init
pub fn next_steps(project_name: &str) -> Vec<String> {
    vec![
        format!("cd {}", project_name),
        "npm install".to_string(),
        "npm run dev".to_string(),
    ]
}
