//! Owner notification and customer confirmation emails.
//!
//! Both are rendered as a plain-text and an HTML alternative. Anything the
//! customer typed is escaped before it lands in the HTML part.

use std::fmt::Write as _;

use super::request::QuoteRequest;
use crate::config::BusinessProfile;
use crate::notify::OutgoingEmail;

const NONE_LISTED: &str = "None listed";
const NO_DEPENDENTS: &str = "No dependents listed";
const OWNER_NEXT_STEPS: &str =
    "Please contact this customer within 12 hours to provide their personalized quote.";

const CUSTOMER_NEXT_STEPS: [&str; 4] = [
    "Our insurance expert will review your information",
    "We'll research the best coverage options for your situation",
    "You'll receive a personalized quote within 12 hours",
    "We'll schedule a consultation to discuss your options",
];

/// Escape the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn or_none_listed(value: &str) -> &str {
    if value.trim().is_empty() {
        NONE_LISTED
    } else {
        value.trim()
    }
}

fn full_name(request: &QuoteRequest) -> String {
    format!("{} {}", request.first_name.trim(), request.last_name.trim())
}

/// Subject, text, and HTML for the business owner's new-lead email.
pub fn owner_notification(request: &QuoteRequest, business: &BusinessProfile) -> OutgoingEmail {
    OutgoingEmail {
        to: business.owner_email.clone(),
        subject: format!("New Insurance Quote Request - {}", full_name(request)),
        text: owner_text(request, business),
        html: owner_html(request, business),
    }
}

/// Subject, text, and HTML for the customer's confirmation email.
pub fn customer_confirmation(request: &QuoteRequest, business: &BusinessProfile) -> OutgoingEmail {
    OutgoingEmail {
        to: request.email.trim().to_string(),
        subject: format!(
            "Thank you for your insurance quote request - {}",
            business.business_name
        ),
        text: customer_text(request, business),
        html: customer_html(request, business),
    }
}

fn owner_text(r: &QuoteRequest, business: &BusinessProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "New Insurance Quote Request - {}\n",
        business.business_name
    );

    let _ = writeln!(out, "CUSTOMER INFORMATION:");
    let _ = writeln!(out, "Name: {}", full_name(r));
    let _ = writeln!(out, "Email: {}", r.email.trim());
    let _ = writeln!(out, "Phone: {}", r.phone.trim());
    let _ = writeln!(out, "ZIP Code: {}\n", r.zip_code.trim());

    let _ = writeln!(out, "FINANCIAL & PERSONAL DETAILS:");
    let _ = writeln!(out, "Date of Birth: {}", r.date_of_birth.trim());
    let _ = writeln!(out, "Annual Income: {}", r.annual_income);
    let _ = writeln!(out, "Desired Budget: {}", r.desired_budget);
    let _ = writeln!(out, "Coverage Type: {}\n", r.coverage_type);

    let _ = writeln!(out, "HEALTH INFORMATION:");
    let _ = writeln!(out, "Health Status: {}", r.health_status);
    let _ = writeln!(
        out,
        "Current Medications: {}\n",
        or_none_listed(&r.medications)
    );

    let _ = writeln!(out, "DEPENDENTS:");
    if r.dependents.is_empty() {
        let _ = writeln!(out, "{NO_DEPENDENTS}");
    } else {
        for (index, dep) in r.dependents.iter().enumerate() {
            let _ = writeln!(out, "Dependent {}:", index + 1);
            let _ = writeln!(out, "- Name: {}", dep.name.trim());
            let _ = writeln!(out, "- Relationship: {}", or_none_listed(&dep.relationship));
            let _ = writeln!(out, "- Date of Birth: {}", or_none_listed(&dep.date_of_birth));
        }
    }
    out.push('\n');

    if r.referred_by {
        let _ = writeln!(out, "REFERRAL:");
        let _ = writeln!(out, "Referred by: {}\n", r.referral_name.trim());
    }

    if !r.additional_info.trim().is_empty() {
        let _ = writeln!(out, "ADDITIONAL INFORMATION:");
        let _ = writeln!(out, "{}\n", r.additional_info.trim());
    }

    let _ = writeln!(out, "{OWNER_NEXT_STEPS}");
    out
}

fn html_section(out: &mut String, title: &str, rows: &[(&str, &str)]) {
    let _ = write!(out, "<div class=\"section\"><h2>{}</h2>", escape_html(title));
    for (label, value) in rows {
        let _ = write!(
            out,
            "<p><strong>{}:</strong> {}</p>",
            escape_html(label),
            escape_html(value)
        );
    }
    out.push_str("</div>");
}

fn html_open(out: &mut String, title: &str, business: &BusinessProfile) {
    let _ = write!(
        out,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title></head>\
         <body style=\"font-family: Arial, sans-serif; line-height: 1.6; color: #333; \
         max-width: 600px; margin: 0 auto; padding: 20px;\">\
         <div class=\"header\"><h1>{title}</h1><p>{}</p></div>",
        escape_html(&business.business_name)
    );
}

fn owner_html(r: &QuoteRequest, business: &BusinessProfile) -> String {
    let mut out = String::new();
    html_open(&mut out, "New Insurance Quote Request", business);

    let name = full_name(r);
    html_section(
        &mut out,
        "Customer Information",
        &[
            ("Name", name.as_str()),
            ("Email", r.email.trim()),
            ("Phone", r.phone.trim()),
            ("ZIP Code", r.zip_code.trim()),
        ],
    );
    html_section(
        &mut out,
        "Financial & Personal Details",
        &[
            ("Date of Birth", r.date_of_birth.trim()),
            ("Annual Income", r.annual_income.as_str()),
            ("Desired Budget", r.desired_budget.as_str()),
            ("Coverage Type", r.coverage_type.as_str()),
        ],
    );
    html_section(
        &mut out,
        "Health Information",
        &[
            ("Health Status", r.health_status.as_str()),
            ("Current Medications", or_none_listed(&r.medications)),
        ],
    );

    out.push_str("<div class=\"section\"><h2>Dependents</h2>");
    if r.dependents.is_empty() {
        let _ = write!(out, "<p>{NO_DEPENDENTS}</p>");
    } else {
        for (index, dep) in r.dependents.iter().enumerate() {
            let _ = write!(
                out,
                "<div class=\"dependent\"><h4>Dependent {}</h4>\
                 <p><strong>Name:</strong> {}</p>\
                 <p><strong>Relationship:</strong> {}</p>\
                 <p><strong>Date of Birth:</strong> {}</p></div>",
                index + 1,
                escape_html(dep.name.trim()),
                escape_html(or_none_listed(&dep.relationship)),
                escape_html(or_none_listed(&dep.date_of_birth)),
            );
        }
    }
    out.push_str("</div>");

    if r.referred_by {
        html_section(
            &mut out,
            "Referral",
            &[("Referred by", r.referral_name.trim())],
        );
    }

    if !r.additional_info.trim().is_empty() {
        let _ = write!(
            out,
            "<div class=\"section\"><h2>Additional Information</h2>\
             <p style=\"white-space: pre-wrap;\">{}</p></div>",
            escape_html(r.additional_info.trim())
        );
    }

    let _ = write!(
        out,
        "<div class=\"next-steps\"><h3>Next Steps</h3><p>{OWNER_NEXT_STEPS}</p></div>\
         </body></html>"
    );
    out
}

fn customer_text(r: &QuoteRequest, business: &BusinessProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Thank you for your insurance quote request!\n");
    let _ = writeln!(out, "Dear {},\n", r.first_name.trim());
    let _ = writeln!(
        out,
        "Thank you for your interest in our insurance services! We have received your \
         quote request and are excited to help you find the perfect coverage for your needs.\n"
    );
    let _ = writeln!(out, "What happens next?");
    for step in CUSTOMER_NEXT_STEPS {
        let _ = writeln!(out, "- {step}");
    }
    let _ = writeln!(
        out,
        "\nIf you have any questions in the meantime, please don't hesitate to contact us:"
    );
    let _ = writeln!(out, "- Phone: {}", business.contact.phone);
    let _ = writeln!(out, "- Email: {}\n", business.contact.email);
    let _ = writeln!(
        out,
        "We look forward to helping you protect what matters most!\n"
    );
    let _ = writeln!(out, "{}", business.agent_name);
    let _ = writeln!(out, "Insurance Professional");
    let _ = writeln!(out, "{}", business.business_name);
    out
}

fn customer_html(r: &QuoteRequest, business: &BusinessProfile) -> String {
    let mut out = String::new();
    html_open(&mut out, "Thank You!", business);

    let _ = write!(
        out,
        "<p>Dear {},</p>\
         <p>Thank you for your interest in our insurance services! We have received your \
         quote request and are excited to help you find the perfect coverage for your needs.</p>\
         <div class=\"section\"><h3>What happens next?</h3><ul>",
        escape_html(r.first_name.trim())
    );
    for step in CUSTOMER_NEXT_STEPS {
        let _ = write!(out, "<li>{}</li>", escape_html(step));
    }
    let _ = write!(
        out,
        "</ul></div>\
         <p>If you have any questions in the meantime, please don&#39;t hesitate to contact us:</p>\
         <ul><li><strong>Phone:</strong> {}</li><li><strong>Email:</strong> {}</li></ul>\
         <p>We look forward to helping you protect what matters most!</p>\
         <div class=\"signature\"><p><strong>{}</strong></p><p>Insurance Professional</p><p>{}</p></div>\
         </body></html>",
        escape_html(&business.contact.phone),
        escape_html(&business.contact.email),
        escape_html(&business.agent_name),
        escape_html(&business.business_name),
    );
    out
}
