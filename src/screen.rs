use std::io::{self, Write};

use crossterm::{
    cursor::Show,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};

/// Where the panel is drawn. Stdout is left alone so the pasted task id
/// is the only thing a calling shell captures.
pub fn ui_output() -> io::Stderr {
    io::stderr()
}

pub fn enter_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, EnterAlternateScreen)
}

pub fn leave_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, Show)
}

/// Print the task id chosen with "paste", if any.
pub fn write_paste<W: Write>(out: &mut W, task_id: Option<&str>) -> io::Result<()> {
    if let Some(task_id) = task_id {
        writeln!(out, "{task_id}")?;
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_control_goes_to_the_ui_writer() {
        let mut ui = Vec::new();
        enter_screen(&mut ui).unwrap();
        leave_screen(&mut ui).unwrap();
        let written = String::from_utf8(ui).unwrap();
        assert!(written.contains("\x1b[?1049h"));
        assert!(written.contains("\x1b[?1049l"));
    }

    #[test]
    fn pasted_id_is_written_alone() {
        let mut stdout = Vec::new();
        write_paste(&mut stdout, Some("TASK-7")).unwrap();
        assert_eq!(stdout, b"TASK-7\n");
    }

    #[test]
    fn nothing_written_without_paste() {
        let mut stdout = Vec::new();
        write_paste(&mut stdout, None).unwrap();
        assert!(stdout.is_empty());
    }
}
