use std::error::Error;
use std::io;
use std::path::PathBuf;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};

use msaview::{
    cli::Cli,
    export::write_results,
    logging::{init_logging, log_critical_error, log_run_config, log_shutdown, set_log_level},
    session::{load_report, resolve_input},
    ui::render_ui,
    App, Report,
};

const PAGE: u16 = 10;

fn main() -> Result<(), Box<dyn Error>> {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    set_log_level();
    if let Err(e) = init_logging() {
        eprintln!("Logging disabled: {e}");
    }
    log_run_config(&cli);

    let result = run(cli);
    if let Err(e) = &result {
        log_critical_error(&e.to_string(), Some("main"));
    }
    log_shutdown();
    result
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let workdir = tempfile::Builder::new().prefix("msaview").tempdir()?;
    info!("Work directory: {:?}", workdir.path());

    let input = resolve_input(&cli, workdir.path())?;
    let report = load_report(&cli, &input, workdir.path())?;

    if cli.no_tui {
        let written = write_results(&cli.output, &report, Some(&input))?;
        print!("{}", report.plain);
        println!("Wrote {} files to {}", written.len(), cli.output.display());
        return Ok(());
    }

    run_dashboard(report, input, cli.output)
}

fn run_dashboard(report: Report, input: PathBuf, output: PathBuf) -> Result<(), Box<dyn Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(report, Some(input), output);
    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Tab | KeyCode::Right => app.next_tab(),
                KeyCode::BackTab | KeyCode::Left => app.prev_tab(),
                KeyCode::Up => app.scroll_up(1),
                KeyCode::Down => app.scroll_down(1),
                KeyCode::PageUp => app.scroll_up(PAGE),
                KeyCode::PageDown => app.scroll_down(PAGE),
                KeyCode::Char('c') => app.toggle_color(),
                KeyCode::Char('e') => app.export(),
                _ => {}
            }
        }
    }
    Ok(())
}
