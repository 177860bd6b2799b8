//! Interactive REPL mode

use authz::AccessControl;
use shared::{AccessQuery, Permission, PermissionEntry, User};
use std::io::{self, Write};

/// Interactive shell for trying permission checks against one user
pub struct InteractiveCli {
    control: AccessControl,
    user: User,
}

impl InteractiveCli {
    pub fn new(control: AccessControl) -> Self {
        let role = control.role_manager().default_role().to_string();
        Self {
            control,
            user: User::new("shell", "shell", role),
        }
    }

    /// Run the interactive REPL
    pub fn run(&mut self) -> anyhow::Result<()> {
        println!("Wareguard Interactive Mode");
        println!("Type /help for commands, /quit to exit");
        println!();

        loop {
            print!("[{}] > ", self.user.role);
            io::stdout().flush()?;

            let mut input = String::new();
            if io::stdin().read_line(&mut input)? == 0 {
                break;
            }
            let input = input.trim();

            if input.is_empty() {
                continue;
            }

            match self.handle_command(input) {
                Ok(true) => break,
                Ok(false) => continue,
                Err(e) => println!("Error: {}", e),
            }
        }

        Ok(())
    }

    fn handle_command(&mut self, input: &str) -> anyhow::Result<bool> {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");

        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Goodbye!");
                return Ok(true);
            }
            "/help" | "/h" => {
                println!("Commands:");
                println!("  /role <id>            - Assign a role template (or set a bare role)");
                println!("  /grant <m:a:r>        - Add a permission tuple");
                println!("  /legacy <string>      - Add a legacy permission string");
                println!("  /clear                - Remove stored permissions");
                println!("  /check <m> <a> <r>    - Evaluate a query (also /check m:a:r)");
                println!("  /routes               - List reachable routes");
                println!("  /status               - Show the current user");
                println!("  /denials              - Show recent denials");
                println!("  /quit                 - Exit");
            }
            "/role" => {
                let role = parts.get(1).ok_or_else(|| anyhow::anyhow!("usage: /role <id>"))?;
                if self.control.role_manager().has_template(role) {
                    self.control.assign_role(&mut self.user, role)?;
                } else {
                    self.user.role = role.to_string();
                    self.user.permissions.clear();
                }
                println!("Role set to: {}", self.user.role);
            }
            "/grant" => {
                let raw = parts.get(1).ok_or_else(|| anyhow::anyhow!("usage: /grant <m:a:r>"))?;
                let permission: Permission = raw.parse()?;
                println!("Granted {}", permission);
                self.user.permissions.push(PermissionEntry::Tuple(permission));
            }
            "/legacy" => {
                let raw = parts.get(1).ok_or_else(|| anyhow::anyhow!("usage: /legacy <string>"))?;
                println!("Granted {} ({})", raw, rbac::normalize_legacy(raw));
                self.user.permissions.push(PermissionEntry::from(*raw));
            }
            "/clear" => {
                self.user.permissions.clear();
                println!("Stored permissions cleared");
            }
            "/check" => {
                let query = match parts.len() {
                    2 => parts[1].parse::<AccessQuery>()?,
                    4 => AccessQuery::new(parts[1], parts[2], parts[3])?,
                    _ => anyhow::bail!("usage: /check <module> <action> <resource>"),
                };
                let verdict = if self.control.authorize(&self.user, &query) {
                    "ALLOW"
                } else {
                    "DENY"
                };
                println!("{} {}", verdict, query);
            }
            "/routes" => {
                for path in self.control.visible_routes(&self.user) {
                    println!("  {}", path);
                }
            }
            "/status" => {
                println!("Status:");
                println!("  Role: {}", self.user.role);
                for p in self.control.effective_permissions(&self.user).sorted_unique() {
                    println!("  {}", p);
                }
            }
            "/denials" => {
                for entry in self.control.recent_denials(10) {
                    println!(
                        "  {} {} ({})",
                        entry.timestamp,
                        entry.permission.as_deref().unwrap_or("-"),
                        entry.reason.as_deref().unwrap_or("-")
                    );
                }
            }
            _ => {
                println!("Unknown command: {}", cmd);
            }
        }

        Ok(false)
    }
}
