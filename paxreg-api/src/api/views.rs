//! Response-facing projections of stored records
//!
//! The wire surface is Portuguese (`nome`, `cpf`, `contatos`, ...); the
//! stored entities keep English field names. Birthdates render in the same
//! fixed format the parsers accept.

use paxreg_common::db::models::{Contact, Passenger, BIRTHDATE_FORMAT};
use serde::Serialize;

/// Shaped contact: `{id, telefone, tipo}`
#[derive(Debug, Serialize)]
pub struct ContactView {
    pub id: i64,
    pub telefone: String,
    pub tipo: String,
}

impl From<Contact> for ContactView {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            telefone: contact.phone,
            tipo: contact.kind,
        }
    }
}

/// Shaped passenger: `{id, nome, cpf, birthdate, flight, contatos}`
#[derive(Debug, Serialize)]
pub struct PassengerView {
    pub id: i64,
    pub nome: String,
    pub cpf: String,
    pub birthdate: String,
    pub flight: String,
    pub contatos: Vec<ContactView>,
}

impl From<Passenger> for PassengerView {
    fn from(passenger: Passenger) -> Self {
        Self {
            id: passenger.id,
            nome: passenger.name,
            cpf: passenger.cpf,
            birthdate: passenger.birthdate.format(BIRTHDATE_FORMAT).to_string(),
            flight: passenger.flight,
            contatos: passenger.contacts.into_iter().map(ContactView::from).collect(),
        }
    }
}

/// Collection wrapper: `{passageiros: [...]}`
#[derive(Debug, Serialize)]
pub struct PassengerListView {
    pub passageiros: Vec<PassengerView>,
}

/// Deletion confirmation: `{message, id}` with the cpf echoed as `id`
#[derive(Debug, Serialize)]
pub struct DeleteConfirmation {
    pub message: String,
    pub id: String,
}
