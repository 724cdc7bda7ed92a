//! Notification templates for demo submission review outcomes.

use super::EmailMessage;

/// Rejection notice, parameterized by the submitting artist's name.
pub fn rejection_email(to: &str, artist_name: &str) -> EmailMessage {
    let html = format!(
        "<p>Hi {artist_name},</p>\
         <p>Thank you for sending us your demo. We appreciate the time and effort you put into your music.</p>\
         <p>After careful consideration, we have decided not to move forward with this specific release. \
         Please understand that this is not a reflection on your talent, but rather a decision based on our \
         current schedule and curatorial direction.</p>\
         <p>We wish you the best of luck with your music and encourage you to submit again in the future.</p>\
         <p>Best regards,<br/>Recursive Recordings Team</p>"
    );
    EmailMessage {
        to: to.to_string(),
        subject: "Update on your demo submission to Recursive Recordings".to_string(),
        html,
    }
}

/// Acceptance notice. A custom message replaces the default body while the
/// greeting and signoff wrapper stays in place.
pub fn acceptance_email(to: &str, artist_name: &str, custom_message: Option<&str>) -> EmailMessage {
    let html = match custom_message {
        Some(message) => format!(
            "<p>Hi {artist_name},</p>{message}<p>Best,<br/>Recursive Team</p>"
        ),
        None => format!(
            "<p>Hi {artist_name},</p>\
             <p>We've listened to your demo and we really like what we hear!</p>\
             <p>We would love to discuss a potential release with you. Please reply to this email \
             so we can take the next steps.</p>\
             <p>Cheers,<br/>Recursive Recordings Team</p>"
        ),
    };
    EmailMessage {
        to: to.to_string(),
        subject: "Great news regarding your demo submission!".to_string(),
        html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_is_parameterized_by_artist_name() {
        let message = rejection_email("nova@example.com", "Nova Static");
        assert_eq!(message.to, "nova@example.com");
        assert!(message.subject.contains("demo submission"));
        assert!(message.html.starts_with("<p>Hi Nova Static,</p>"));
        assert!(message.html.contains("not to move forward"));
    }

    #[test]
    fn acceptance_custom_message_sits_between_greeting_and_signoff() {
        let message = acceptance_email(
            "nova@example.com",
            "Nova Static",
            Some("<p>We want Midnight Circuit on the spring compilation.</p>"),
        );

        let greeting_at = message.html.find("<p>Hi Nova Static,</p>").unwrap();
        let custom_at = message
            .html
            .find("<p>We want Midnight Circuit on the spring compilation.</p>")
            .unwrap();
        let signoff_at = message.html.find("<p>Best,<br/>Recursive Team</p>").unwrap();
        assert!(greeting_at < custom_at);
        assert!(custom_at < signoff_at);
        // The default body is fully replaced
        assert!(!message.html.contains("really like what we hear"));
    }

    #[test]
    fn acceptance_default_body_without_custom_message() {
        let message = acceptance_email("nova@example.com", "Nova Static", None);
        assert!(message.html.contains("really like what we hear"));
        assert!(message.html.contains("Cheers,<br/>Recursive Recordings Team"));
    }
}
