/*!
 * fifodev - Demo Console Adapter
 *
 * Plays the transport-adapter role over stdin/stdout, the way the queue
 * device was historically exercised with echo and cat:
 * - any other input line is written to the device as one payload
 * - `read` drains the device's current read count, `read <n>` drains exactly n
 * - `stats` prints the device snapshot as JSON
 */

use anyhow::Result;
use fifodev::{init_tracing, DeviceError, FifoDevice};
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

fn main() -> Result<()> {
    // Initialize structured tracing
    init_tracing();

    info!("fifodev demo adapter starting...");
    info!("================================================");

    let device = FifoDevice::new();
    let stats = device.stats();
    info!(
        capacity = stats.capacity,
        read_count = stats.read_count,
        "Device ready"
    );

    info!("Commands: <payload> | read | read <n> | stats | quit");
    info!("Reads block until enough values are queued (Ctrl+C to abort)");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        // A failed transport read is the adapter's copy fault, surfaced
        // before the device sees any bytes
        let mut line = String::new();
        let taken = stdin
            .lock()
            .read_line(&mut line)
            .map_err(|e| DeviceError::CopyFault(e.to_string()))?;
        if taken == 0 {
            break; // EOF
        }
        let line = line.trim_end_matches(['\n', '\r']);

        match line {
            "" => {}
            "quit" | "exit" => break,
            "stats" => println!("{}", serde_json::to_string_pretty(&device.stats())?),
            "read" => match device.read() {
                Ok(text) => println!("{}", text),
                Err(e) => warn!(error = %e, "read failed"),
            },
            _ if line.starts_with("read ") => {
                match line["read ".len()..].trim().parse::<usize>() {
                    Ok(count) => match device.read_exact(count) {
                        Ok(text) => println!("{}", text),
                        Err(e) => warn!(error = %e, "read failed"),
                    },
                    Err(e) => warn!(error = %e, "read takes a decimal count"),
                }
            }
            payload => match device.write(payload.as_bytes()) {
                Ok(report) => info!(
                    queued = report.queued,
                    rejected = report.rejected,
                    read_count = report.read_count,
                    "write accepted"
                ),
                Err(e) => warn!(error = %e, "write failed"),
            },
        }
    }

    info!("fifodev demo adapter exiting");
    Ok(())
}
