//! Interactive nPM6001 console on stdin/stdout, backed by a simulated PMIC.
//!
//! The simulation is a plain RAM register file, so every command works
//! without hardware. Useful for exploring the console and for demos:
//!
//! ```text
//! npm6001> vreg DCDC3 2500
//! Successfully set DCDC3 voltage
//! npm6001> reg DCDC3VOUT
//! DCDC3VOUT=0x50
//! ```

use std::io::{self, BufRead, Write};

use npm6001::device::{Npm6001, Twi};
use npm6001::shell::{Severity, Shell, Terminal};

/// TWI bus simulated by a RAM register file.
struct SimTwi {
    regs: [u8; 256],
}

impl SimTwi {
    fn new() -> Self {
        Self { regs: [0; 256] }
    }
}

impl Twi for SimTwi {
    type Error = core::convert::Infallible;

    fn register_read(&mut self, reg_addr: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        let base = reg_addr as usize;
        buf.copy_from_slice(&self.regs[base..base + buf.len()]);
        Ok(())
    }

    fn register_write(&mut self, reg_addr: u8, buf: &[u8]) -> Result<(), Self::Error> {
        let base = reg_addr as usize;
        self.regs[base..base + buf.len()].copy_from_slice(buf);
        Ok(())
    }
}

struct Stdout;

impl Terminal for Stdout {
    fn write(&mut self, text: &str) {
        print!("{}", text);
        let _ = io::stdout().flush();
    }

    fn line(&mut self, severity: Severity, text: &str) {
        match severity {
            Severity::Info => println!("{}", text),
            Severity::Warn => println!("warning: {}", text),
            Severity::Error => println!("error: {}", text),
        }
    }
}

fn prompt() {
    print!("npm6001> ");
    let _ = io::stdout().flush();
}

fn main() -> io::Result<()> {
    println!("nPM6001 console (simulated device). Type 'help' to list commands.");

    let mut driver = Npm6001::new(SimTwi::new());
    if driver.init().is_err() {
        eprintln!("error: device init failed");
        return Ok(());
    }

    // The terminal is line buffered and echoes locally.
    let mut shell = Shell::new(driver, Stdout);
    shell.set_echo(false);

    prompt();
    for line in io::stdin().lock().lines() {
        let line = line?;
        if shell.input(line.as_bytes()).is_err() {
            println!("warning: line too long, ignored");
            // Drop the truncated line by rebuilding the console.
            let (driver, terminal) = shell.release();
            shell = Shell::new(driver, terminal);
            shell.set_echo(false);
            prompt();
            continue;
        }
        shell.input(b"\r").ok();
        prompt();
    }
    println!();
    Ok(())
}
