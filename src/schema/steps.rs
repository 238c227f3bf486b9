//! The four booking schemas

use regex::Regex;
use std::sync::LazyLock;

use super::{Constraint, FieldRule, Schema, STEP_COUNT};

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z -]*$").unwrap());

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
        .unwrap()
});

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+?[0-9]{10,15}$").unwrap());

static NON_EMPTY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S").unwrap());

static CARD_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{16}$").unwrap());

static CVV_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{3}$").unwrap());

pub(super) fn build_all() -> [Schema; STEP_COUNT] {
    [traveler(), destination(), accommodation(), payment()]
}

fn traveler() -> Schema {
    Schema {
        index: 0,
        fields: vec![
            FieldRule::text("firstname")
                .required("Firstname is required")
                .matches(&NAME_RE, "Only alphabets are allowed"),
            FieldRule::text("surname")
                .required("Surname is required")
                .matches(&NAME_RE, "Only alphabets are allowed"),
            FieldRule::text("email")
                .required("Email is required")
                .matches(&EMAIL_RE, "Invalid email format"),
            FieldRule::text("phoneNumber")
                .required("Phone Number is required")
                .matches(&PHONE_RE, "Invalid phone number format"),
            FieldRule::integer(
                "numberOfTravelers",
                "Number of Travelers must be a whole number",
            )
            .required("Number of Travelers is required")
            .min(1, "Number of Travelers must be a positive number"),
            FieldRule::integer(
                "numberOfChildren",
                "Number of Children must be a whole number",
            )
            .min(0, "Number of Children cannot be negative"),
        ],
    }
}

fn destination() -> Schema {
    Schema {
        index: 1,
        fields: vec![
            FieldRule::text("destination")
                .controlled()
                .required("Destination is required")
                .matches(&NON_EMPTY_RE, "Destination is required"),
            FieldRule::date_range("dateRange", "Date range is required")
                .controlled()
                .required("Date range is required")
                .with(Constraint::StartNotPast {
                    message: "Departure date cannot be in the past",
                })
                .with(Constraint::EndNotBeforeStart {
                    message: "Return date cannot be before the departure date",
                }),
        ],
    }
}

fn accommodation() -> Schema {
    Schema {
        index: 2,
        fields: vec![
            FieldRule::integer("hotelStarRating", "Hotel Star Rating must be a whole number")
                .required("Hotel Star Rating is required")
                .min(1, "Hotel Star Rating must be at least 1")
                .max(5, "Hotel Star Rating must be at most 5"),
            FieldRule::text("typeOfRoom")
                .controlled()
                .required("Type of Room is required"),
            FieldRule::text("specialRequests"),
        ],
    }
}

fn payment() -> Schema {
    Schema {
        index: 3,
        fields: vec![
            FieldRule::text("cardholderName").required("Cardholder Name is required"),
            FieldRule::text("cardNumber")
                .required("Card Number is required")
                .matches(&CARD_NUMBER_RE, "Invalid Card Number"),
            FieldRule::year_month("expiryDate", "Invalid expiry date format")
                .required("Expiry Date is required")
                .with(Constraint::ExpiryNotPast {
                    message: "Expiry date cannot be in the past",
                }),
            FieldRule::text("cvv")
                .required("CVV is required")
                .matches(&CVV_RE, "Invalid CVV"),
        ],
    }
}
