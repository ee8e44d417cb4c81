use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;
use windows::Win32::Graphics::Dxgi::*;

/// Drains the DXGI info queue into the log.
pub fn print_dxgi_debug_messages(info_queue: Option<&IDXGIInfoQueue>) {
    let Some(queue) = info_queue else {
        debug!("DXGI info queue not available");
        return;
    };

    let num_messages = unsafe { queue.GetNumStoredMessages(DXGI_DEBUG_ALL) };
    for i in 0..num_messages {
        let mut message_size: usize = 0;
        if unsafe { queue.GetMessage(DXGI_DEBUG_ALL, i, None, &mut message_size) }.is_err() {
            warn!("Could not size DXGI message {i}");
            continue;
        }

        // The message header is followed by its description in the same allocation,
        // so the buffer is u64 backed to satisfy the header's alignment.
        let mut buffer = vec![0u64; message_size.div_ceil(std::mem::size_of::<u64>())];
        let message = buffer.as_mut_ptr() as *mut DXGI_INFO_QUEUE_MESSAGE;
        if unsafe { queue.GetMessage(DXGI_DEBUG_ALL, i, Some(message), &mut message_size) }
            .is_err()
        {
            warn!("Could not read DXGI message {i}");
            continue;
        }

        let message = unsafe { &*message };
        let description = unsafe {
            std::slice::from_raw_parts(
                message.pDescription as *const u8,
                message.DescriptionByteLength,
            )
        };
        let description = String::from_utf8_lossy(description);
        let description = description.trim_end_matches('\0').trim();

        match message.Severity {
            DXGI_INFO_QUEUE_MESSAGE_SEVERITY_CORRUPTION
            | DXGI_INFO_QUEUE_MESSAGE_SEVERITY_ERROR => {
                error!(id = message.ID, "{description}")
            }
            DXGI_INFO_QUEUE_MESSAGE_SEVERITY_WARNING => warn!(id = message.ID, "{description}"),
            _ => info!(id = message.ID, "{description}"),
        }
    }
    unsafe { queue.ClearStoredMessages(DXGI_DEBUG_ALL) };
}
