// Group raw crash events by container identity into one log transcript each.

use std::collections::HashMap;

use crate::models::{ContainerLogTranscript, CrashEvent};

/// Separator placed between two log fragments of the same container.
pub const FRAGMENT_SEPARATOR: &str = "\n\n";

/// One transcript per distinct `container_id`, in order of first appearance.
/// Fragments are joined in arrival order; the display name is taken from the first event.
pub fn consolidate(events: &[CrashEvent]) -> Vec<ContainerLogTranscript> {
    let (transcripts, _) = events.iter().fold(
        (Vec::<ContainerLogTranscript>::new(), HashMap::<&str, usize>::new()),
        |(mut out, mut slot_by_id), event| {
            match slot_by_id.get(event.container_id.as_str()) {
                Some(&slot) => {
                    let log = &mut out[slot].log_text;
                    log.push_str(FRAGMENT_SEPARATOR);
                    log.push_str(&event.log_text);
                }
                None => {
                    slot_by_id.insert(event.container_id.as_str(), out.len());
                    out.push(ContainerLogTranscript {
                        container_id: event.container_id.clone(),
                        container_name: event.container_name.clone(),
                        log_text: event.log_text.clone(),
                    });
                }
            }
            (out, slot_by_id)
        },
    );
    transcripts
}
