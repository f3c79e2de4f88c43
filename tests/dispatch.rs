use libcommander::dispatch::Dispatch;
use libcommander::response::{BufferResponse, FnResponse, NullResponse, Response};
use libcommander::table::{Command, CommandTable, DefaultTable, Error};
use std::cell::RefCell;

thread_local! {
    /// Per-thread output capture for `FnResponse`
    static TEST_OUTPUT: RefCell<String> = RefCell::new(String::new());
}

fn test_output_fn(text: &str) {
    TEST_OUTPUT.with(|output| output.borrow_mut().push_str(text));
}

fn take_test_output() -> String {
    TEST_OUTPUT.with(|output| output.borrow_mut().split_off(0))
}

/// Handlers report their name and the argument tail they received
fn stop_func(args: &str, response: &mut dyn Response) {
    core::write!(response, "stop[{}]", args);
}

fn start_func(args: &str, response: &mut dyn Response) {
    core::write!(response, "start[{}]", args);
}

fn left_func(args: &str, response: &mut dyn Response) {
    core::write!(response, "left[{}]", args);
}

fn right_func(args: &str, response: &mut dyn Response) {
    core::write!(response, "right[{}]", args);
}

static MOTOR_COMMANDS: [Command; 4] = [
    Command::new("stop", "basic stop command", stop_func),
    Command::new("start", "basic start command", start_func),
    Command::new("left", "command used to turn left", left_func),
    Command::new("right", "command used to turn right", right_func),
];

fn motor_table() -> CommandTable<8> {
    let mut table = CommandTable::new();
    table.attach(&MOTOR_COMMANDS).unwrap();
    table.init().unwrap();
    table
}

fn run(table: &CommandTable<8>, line: &str) -> (Dispatch, String) {
    let mut response = BufferResponse::<128>::new();
    let outcome = table.execute(line, &mut response);
    (outcome, response.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_command_without_arguments() {
        let table = motor_table();

        for command in &MOTOR_COMMANDS {
            let (outcome, output) = run(&table, command.name);
            assert_eq!(outcome, Dispatch::Executed);
            assert_eq!(output, format!("{}[]", command.name));
        }
    }

    #[test]
    fn test_arguments_are_passed_verbatim() {
        let table = motor_table();

        assert_eq!(
            run(&table, "stop arg1 arg2"),
            (Dispatch::Executed, "stop[arg1 arg2]".to_string())
        );
        assert_eq!(
            run(&table, "left  padded tail "),
            (Dispatch::Executed, "left[ padded tail ]".to_string())
        );
        assert_eq!(
            run(&table, "right "),
            (Dispatch::Executed, "right[]".to_string())
        );
    }

    #[test]
    fn test_unknown_command() {
        let table = motor_table();

        assert_eq!(
            run(&table, "unknownthing with args"),
            (
                Dispatch::NotFound,
                "Command 'unknownthing' not found!\r\n".to_string()
            )
        );
    }

    #[test]
    fn test_token_shorter_than_name_is_not_found() {
        let table = motor_table();

        let (outcome, output) = run(&table, "sto");
        assert_eq!(outcome, Dispatch::NotFound);
        assert_eq!(output, "Command 'sto' not found!\r\n");
    }

    #[test]
    fn test_token_starting_with_name_matches() {
        let table = motor_table();

        assert_eq!(
            run(&table, "stopnow 1"),
            (Dispatch::Executed, "stop[1]".to_string())
        );
        assert_eq!(
            run(&table, "leftward"),
            (Dispatch::Executed, "left[]".to_string())
        );
    }

    #[test]
    fn test_empty_line() {
        let table = motor_table();

        assert_eq!(
            run(&table, ""),
            (Dispatch::NotFound, "Command '' not found!\r\n".to_string())
        );
    }

    #[test]
    fn test_empty_table() {
        let mut table = DefaultTable::new();
        table.init().unwrap();

        let mut response = BufferResponse::<64>::new();
        assert_eq!(table.execute("stop", &mut response), Dispatch::NotFound);
        assert_eq!(response.as_str(), "Command 'stop' not found!\r\n");
    }

    #[test]
    fn test_dispatch_before_init() {
        let mut table = CommandTable::<8>::new();
        table.attach(&MOTOR_COMMANDS).unwrap();

        assert_eq!(
            run(&table, "right 90"),
            (Dispatch::Executed, "right[90]".to_string())
        );
    }

    #[test]
    fn test_line_is_reusable() {
        let table = motor_table();
        let line = String::from("start fast");

        assert_eq!(run(&table, &line).1, "start[fast]");
        assert_eq!(run(&table, &line).1, "start[fast]");
        assert_eq!(line, "start fast");
    }

    #[test]
    fn test_overlapping_name_cannot_shadow_command() {
        let mut table = CommandTable::<8>::new();
        table.register("stop", "basic stop command", stop_func).unwrap();
        assert_eq!(
            table.register("st", "shorter stop", start_func),
            Err(Error::PrefixConflict)
        );
        table.init().unwrap();

        assert_eq!(run(&table, "stop"), (Dispatch::Executed, "stop[]".to_string()));
    }

    #[test]
    fn test_every_registered_name_selects_itself() {
        let mut table = CommandTable::<8>::new();
        table.register("st", "shorter stop", start_func).unwrap();
        assert_eq!(
            table.register("stop", "basic stop command", stop_func),
            Err(Error::PrefixConflict)
        );
        table.attach(&MOTOR_COMMANDS[2..]).unwrap();
        table.init().unwrap();

        for command in &table {
            let mut response = BufferResponse::<32>::new();
            table.execute(command.name, &mut response);
            let mut expected = BufferResponse::<32>::new();
            (command.handler)("", &mut expected);
            assert_eq!(response.as_str(), expected.as_str());
        }
    }

    #[test]
    fn test_builtin_help_lists_commands() {
        let table = motor_table();

        assert_eq!(
            run(&table, "help"),
            (
                Dispatch::Executed,
                "0.\tleft\r\n1.\tright\r\n2.\tstart\r\n3.\tstop\r\n".to_string()
            )
        );
    }

    #[test]
    fn test_builtin_help_with_descriptions() {
        let table = motor_table();

        let mut response = BufferResponse::<256>::new();
        assert_eq!(table.execute("help -d", &mut response), Dispatch::Executed);
        assert_eq!(
            response.as_str(),
            "left\tcommand used to turn left\r\n\
             right\tcommand used to turn right\r\n\
             start\tbasic start command\r\n\
             stop\tbasic stop command\r\n"
        );
    }

    #[test]
    fn test_builtin_describe() {
        let table = motor_table();

        assert_eq!(
            run(&table, "stop?"),
            (Dispatch::Executed, "basic stop command\r\n".to_string())
        );
        assert_eq!(
            run(&table, "sto?"),
            (Dispatch::NotFound, "Command 'sto' not found!\r\n".to_string())
        );
        assert_eq!(
            run(&table, "?"),
            (Dispatch::NotFound, "Command '?' not found!\r\n".to_string())
        );
    }

    #[test]
    fn test_builtin_help_disabled() {
        let mut table = motor_table();
        table.set_help(false);

        assert_eq!(
            run(&table, "help"),
            (Dispatch::NotFound, "Command 'help' not found!\r\n".to_string())
        );
        // falls through to prefix matching
        assert_eq!(run(&table, "stop?"), (Dispatch::Executed, "stop[]".to_string()));
    }

    #[test]
    fn test_registered_help_replaces_builtin() {
        let mut table = CommandTable::<4>::new();
        table
            .register("help", "custom help", |args, response| {
                core::write!(response, "custom[{}]", args);
            })
            .unwrap();
        table.init().unwrap();

        let mut response = BufferResponse::<32>::new();
        assert_eq!(table.execute("help -d", &mut response), Dispatch::Executed);
        assert_eq!(response.as_str(), "custom[-d]");
    }

    #[test]
    fn test_fn_response() {
        let table = motor_table();
        take_test_output();

        let mut response = FnResponse::new(test_output_fn);
        assert_eq!(table.execute("left 15", &mut response), Dispatch::Executed);
        assert_eq!(table.execute("jump", &mut response), Dispatch::NotFound);

        assert_eq!(
            take_test_output(),
            "left[15]Command 'jump' not found!\r\n"
        );
    }

    #[test]
    fn test_null_response() {
        let table = motor_table();
        assert_eq!(
            table.execute("stop", &mut NullResponse),
            Dispatch::Executed
        );
    }

    #[test]
    fn test_commands_macro() {
        let mut table = CommandTable::<4>::new();
        libcommander::commands!(table,
            ("ping", "Reply with pong", |_, response| response.println("pong")),
            ("echo", "Echo the arguments", |args, response| response.println(args)),
        );
        table.init().unwrap();

        let mut response = BufferResponse::<32>::new();
        table.execute("ping", &mut response);
        table.execute("echo a b", &mut response);
        assert_eq!(response.as_str(), "pong\r\na b\r\n");
    }

    #[test]
    #[should_panic(expected = "Failed to register command")]
    fn test_commands_macro_panics_on_overflow() {
        let mut table = CommandTable::<1>::new();
        libcommander::commands!(table,
            ("a", "", |_, _| {}),
            ("b", "", |_, _| {}),
        );
    }
}
