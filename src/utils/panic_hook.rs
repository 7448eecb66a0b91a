//! Routes panic reports through `tracing`

use std::any::Any;

/// Text carried by a panic payload
pub fn payload_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "Box<dyn Any>"
    }
}

/// Replace the default panic hook with one that logs at error level
pub fn install() {
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown location".to_string());
        tracing::error!(location = %location, "panic: {}", payload_message(info.payload()));
    }));
    tracing::debug!("Panic hook installed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_message() {
        let borrowed: Box<dyn Any + Send> = Box::new("boom");
        let owned: Box<dyn Any + Send> = Box::new(String::from("bang"));
        let other: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(payload_message(borrowed.as_ref()), "boom");
        assert_eq!(payload_message(owned.as_ref()), "bang");
        assert_eq!(payload_message(other.as_ref()), "Box<dyn Any>");
    }
}
