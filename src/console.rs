//! Interactive graph menu.
//!
//! Reads from any [`BufRead`] and writes to any [`Write`]; the binary wires
//! it to stdin/stdout. End of input leaves the menu the same way the exit
//! entry does.

use anyhow::Result;
use std::io::{BufRead, Write};
use wardgraph_core::{report, EdgeChange, Error, LocationId, Weight};
use wardgraph_storage::GraphManager;

const BANNER: &str = "========================================";

const MENU: [&str; 11] = [
    "View Graph",
    "Add Node (Department/Location)",
    "Add Edge (Connection)",
    "Add Edge by Name",
    "Remove Edge",
    "View Node Details",
    "View Connections",
    "Find Shortest Path",
    "View Department Connections",
    "Find Connected Components",
    "Exit",
];

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the menu until the user exits or input ends.
    pub fn run(&mut self, manager: &mut GraphManager) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt_int("Enter your choice: ")? else {
                return Ok(());
            };
            if choice == MENU.len() as i64 {
                return Ok(());
            }
            if !self.dispatch(choice, manager)? {
                return Ok(());
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n{BANNER}")?;
        writeln!(self.output, "    HOSPITAL GRAPH (DEPARTMENTS)")?;
        writeln!(self.output, "{BANNER}\n")?;
        for (i, entry) in MENU.iter().enumerate() {
            writeln!(self.output, "{}. {entry}", i + 1)?;
        }
        writeln!(self.output, "{BANNER}")?;
        Ok(())
    }

    /// Handle one menu entry. `false` means input ran out mid-entry.
    fn dispatch(&mut self, choice: i64, manager: &mut GraphManager) -> Result<bool> {
        match choice {
            1 => report::view_graph(&mut self.output, manager.graph())?,
            2 => {
                let Some(name) = self.prompt_string("Enter Node Name: ")? else {
                    return Ok(false);
                };
                let Some(kind) = self.prompt_string("Enter Type (Department/Ward/etc): ")? else {
                    return Ok(false);
                };
                match manager.add_node(&name, &kind) {
                    Ok(id) => writeln!(self.output, "\nNode added successfully! ID: {id}")?,
                    Err(e) => self.print_failure(&e)?,
                }
            }
            3 => {
                let Some((from, to)) = self.prompt_id_pair()? else {
                    return Ok(false);
                };
                let Some(weight) = self.prompt_weight()? else {
                    return Ok(false);
                };
                let outcome = manager.add_edge(from, to, weight);
                self.print_edge_change(outcome)?;
            }
            4 => {
                let Some(from) = self.prompt_string("Enter From Node Name: ")? else {
                    return Ok(false);
                };
                let Some(to) = self.prompt_string("Enter To Node Name: ")? else {
                    return Ok(false);
                };
                let Some(weight) = self.prompt_weight()? else {
                    return Ok(false);
                };
                let outcome = manager.add_edge_by_name(&from, &to, weight);
                self.print_edge_change(outcome)?;
            }
            5 => {
                let Some((from, to)) = self.prompt_id_pair()? else {
                    return Ok(false);
                };
                match manager.remove_edge(from, to) {
                    Ok(true) => writeln!(self.output, "\nEdge removed successfully!")?,
                    Ok(false) => writeln!(self.output, "\nNo edge between those nodes.")?,
                    Err(e) => self.print_failure(&e)?,
                }
            }
            6 | 7 => {
                let Some(id) = self.prompt_id("Enter Node ID: ")? else {
                    return Ok(false);
                };
                if choice == 6 {
                    report::view_node(&mut self.output, manager.graph(), id)?;
                } else {
                    report::view_connections(&mut self.output, manager.graph(), id)?;
                }
            }
            8 => {
                let Some((from, to)) = self.prompt_id_pair()? else {
                    return Ok(false);
                };
                report::shortest_path(
                    &mut self.output,
                    manager.graph(),
                    from,
                    to,
                    manager.path_strategy(),
                )?;
            }
            9 => report::department_connections(&mut self.output, manager.graph())?,
            10 => report::connected_components(&mut self.output, manager.graph())?,
            _ => writeln!(self.output, "\nInvalid choice!")?,
        }
        Ok(true)
    }

    fn print_edge_change(&mut self, outcome: Result<EdgeChange>) -> Result<()> {
        match outcome {
            Ok(EdgeChange::Added) => writeln!(self.output, "\nEdge added successfully!")?,
            Ok(EdgeChange::Updated { .. }) => {
                writeln!(self.output, "\nEdge already exists! Updating distance.")?
            }
            Err(e) => self.print_failure(&e)?,
        }
        Ok(())
    }

    fn print_failure(&mut self, err: &anyhow::Error) -> Result<()> {
        match err.downcast_ref::<Error>() {
            Some(Error::NameExists(name)) => {
                writeln!(self.output, "\nNode with name '{name}' already exists!")?
            }
            Some(Error::LocationNotFound(_)) => writeln!(self.output, "\nInvalid node IDs!")?,
            Some(Error::NameNotFound(_)) => {
                writeln!(self.output, "\nOne or both nodes not found!")?
            }
            _ => {
                tracing::error!(error = %format!("{err:#}"), "graph operation failed");
                writeln!(self.output, "\nError: {err:#}")?
            }
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt_int(&mut self, prompt: &str) -> Result<Option<i64>> {
        write!(self.output, "{prompt}")?;
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.trim().parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => write!(self.output, "Invalid input! Please enter a number: ")?,
            }
        }
    }

    fn prompt_string(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            if !line.is_empty() {
                return Ok(Some(line));
            }
            write!(self.output, "Input cannot be empty! Please enter again: ")?;
        }
    }

    fn prompt_id(&mut self, prompt: &str) -> Result<Option<LocationId>> {
        // Ids start at 1, so anything below maps to 0 and reads as unknown
        Ok(self
            .prompt_int(prompt)?
            .map(|v| LocationId::try_from(v).unwrap_or(0)))
    }

    fn prompt_id_pair(&mut self) -> Result<Option<(LocationId, LocationId)>> {
        let Some(from) = self.prompt_id("Enter From Node ID: ")? else {
            return Ok(None);
        };
        Ok(self.prompt_id("Enter To Node ID: ")?.map(|to| (from, to)))
    }

    fn prompt_weight(&mut self) -> Result<Option<Weight>> {
        let mut prompt = "Enter Distance: ";
        loop {
            let Some(value) = self.prompt_int(prompt)? else {
                return Ok(None);
            };
            match Weight::try_from(value) {
                Ok(weight) => return Ok(Some(weight)),
                Err(_) => prompt = "Distance must be a non-negative number: ",
            }
        }
    }
}
