//! Translation between wire DTOs and the domain entity
//!
//! Pure functions with no side effects.

use clientes_domain::Customer;

use crate::dto::customer::{CustomerRequest, CustomerResponse};

/// Build an unsaved customer from a request body
///
/// Only name, email and phone are copied; id, registration timestamp and
/// activation flag are left for the storage to assign.
pub fn request_to_entity(request: CustomerRequest) -> Customer {
    Customer::new(
        request.nombre.unwrap_or_default(),
        request.email,
        request.telefono,
    )
}

/// Copy every field of a customer into its response shape
pub fn entity_to_response(customer: Customer) -> CustomerResponse {
    CustomerResponse {
        id: customer.id().map(i64::from),
        nombre: customer.name().to_owned(),
        email: customer.email().map(str::to_owned),
        telefono: customer.phone().map(str::to_owned),
        fecha_registro: customer.registered_at().copied(),
        activo: customer.is_active(),
    }
}

/// Map a list element-wise, preserving order
pub fn list_to_responses(customers: Vec<Customer>) -> Vec<CustomerResponse> {
    customers.into_iter().map(entity_to_response).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use clientes_domain::CustomerId;

    #[test]
    fn test_request_to_entity_copies_contact_fields_only() {
        let customer = request_to_entity(CustomerRequest {
            nombre: Some("Maria Lopez".to_string()),
            email: Some("maria.lopez@example.com".to_string()),
            telefono: None,
        });

        assert_eq!(customer.name(), "Maria Lopez");
        assert_eq!(customer.email(), Some("maria.lopez@example.com"));
        assert_eq!(customer.phone(), None);
        assert!(customer.id().is_none());
        assert!(customer.registered_at().is_none());
        assert!(customer.is_active());
    }

    #[test]
    fn test_entity_to_response_copies_everything() {
        let registered = Utc::now();
        let customer = Customer::from_parts(
            CustomerId::new(3),
            "Ana".to_string(),
            Some("ana@example.com".to_string()),
            Some("555".to_string()),
            registered,
            false,
        );

        let response = entity_to_response(customer);

        assert_eq!(
            response,
            CustomerResponse {
                id: Some(3),
                nombre: "Ana".to_string(),
                email: Some("ana@example.com".to_string()),
                telefono: Some("555".to_string()),
                fecha_registro: Some(registered),
                activo: false,
            }
        );
    }

    #[test]
    fn test_list_to_responses_preserves_order() {
        let now = Utc::now();
        let customers = vec![
            Customer::from_parts(CustomerId::new(2), "B".into(), None, None, now, true),
            Customer::from_parts(CustomerId::new(1), "A".into(), None, None, now, true),
        ];

        let ids: Vec<_> = list_to_responses(customers)
            .into_iter()
            .map(|r| r.id)
            .collect();

        assert_eq!(ids, vec![Some(2), Some(1)]);
        assert!(list_to_responses(Vec::new()).is_empty());
    }

    #[test]
    fn test_response_uses_wire_field_names() {
        let response = entity_to_response(Customer::from_parts(
            CustomerId::new(1),
            "Ana".into(),
            None,
            None,
            Utc::now(),
            true,
        ));

        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("fechaRegistro").is_some());
        assert_eq!(json["activo"], true);
        assert_eq!(json["nombre"], "Ana");
    }
}
