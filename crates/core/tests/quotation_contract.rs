//! End-to-end contract for one quotation-building session: filter catalogs,
//! assemble line items, derive costs, and confirm warnings stay advisory.

use rust_decimal::Decimal;
use tripquote_core::{
    aggregate, check_warnings, filter_by_country, resolve_conversion, resolve_hotel_rate, validate,
    AccommodationLineItem, ActivityLineItem, CatalogChoice, CountryId, CurrencyConversion, Hotel,
    MealPlan, MealPlanSelection, QuotationDraft, QuotationWarning, RateCard, SessionContext,
    TransferLineItem,
};

fn thailand() -> CountryId {
    CountryId("country-th".to_owned())
}

fn hotel_catalog() -> Vec<Hotel> {
    vec![
        Hotel {
            id: "hotel-1".to_owned(),
            name: "Sea View Resort".to_owned(),
            destination: "Patong".to_owned(),
            state: "Phuket".to_owned(),
            country_id: thailand(),
            rate_cards: vec![RateCard {
                room_type: "Deluxe".to_owned(),
                rate: Decimal::from(4500),
            }],
            base_price_per_night: Some(Decimal::from(3000)),
        },
        Hotel {
            id: "hotel-2".to_owned(),
            name: "Palm Court".to_owned(),
            destination: "Ao Nang".to_owned(),
            state: "Krabi".to_owned(),
            country_id: thailand(),
            rate_cards: Vec::new(),
            base_price_per_night: Some(Decimal::from(3000)),
        },
    ]
}

fn meal_plan_catalog() -> Vec<MealPlan> {
    vec![MealPlan {
        id: "plan-1".to_owned(),
        name: "Breakfast + Dinner".to_owned(),
        country_id: thailand(),
        rate_per_person: Decimal::from(200),
    }]
}

#[test]
fn full_session_derives_the_expected_costs() {
    let session = SessionContext { selected_country_id: Some(thailand()) };
    let mut draft = QuotationDraft::new(&session);
    draft.client.name = "R. Sharma".to_owned();
    draft.travel.travel_date = chrono::NaiveDate::from_ymd_opt(2026, 12, 4);
    draft.travel.group_size = 2;
    draft.travel.declared_total_nights = 3;
    draft.location = "Phuket".to_owned();

    // Hotel resolution feeds the accommodation entry the way the builder does.
    let hotels = hotel_catalog();
    let deluxe =
        resolve_hotel_rate(&hotels, session.selected_country_id.as_ref(), "Phuket", "Sea View Resort");
    assert_eq!(deluxe.room_type, "Deluxe");
    draft.accommodations.push(AccommodationLineItem {
        location: "Phuket".to_owned(),
        hotel_name: CatalogChoice::Selected("hotel-1".to_owned()),
        room_type: deluxe.room_type,
        nights: 2,
        price_per_night: Decimal::from(1000),
    });
    let standard =
        resolve_hotel_rate(&hotels, session.selected_country_id.as_ref(), "Krabi", "Palm Court");
    assert_eq!(standard.room_type, "Standard");
    assert_eq!(standard.price_per_night, Decimal::from(3000));
    draft.accommodations.push(AccommodationLineItem {
        location: "Krabi".to_owned(),
        hotel_name: CatalogChoice::Selected("hotel-2".to_owned()),
        room_type: standard.room_type,
        nights: 1,
        price_per_night: Decimal::from(500),
    });

    draft.transfers.push(TransferLineItem {
        transfer_type: "Airport pickup".to_owned(),
        vehicle_name: CatalogChoice::Custom("Private van".to_owned()),
        price: Decimal::from(300),
    });

    let plans = meal_plan_catalog();
    let filtered = filter_by_country(&plans, session.selected_country_id.as_ref());
    assert_eq!(filtered.len(), 1);
    draft.meal_plan = Some(MealPlanSelection {
        plan: CatalogChoice::Selected(filtered[0].id.clone()),
        rate_per_person: filtered[0].rate_per_person,
    });

    draft.activities.push(ActivityLineItem::new(
        "Island hopping",
        "shared speedboat",
        Decimal::from(300),
        Decimal::from(100),
        1,
    ));
    draft.flight_cost_per_person = Decimal::from(5000);

    validate(&draft).expect("complete draft passes validation");
    assert!(check_warnings(&draft).is_empty());

    let costs = aggregate(&draft);
    assert_eq!(costs.total_nights, 3);
    assert_eq!(costs.land_cost_per_head, Decimal::from(1800));
    assert_eq!(costs.total_per_head, Decimal::from(6800));
    assert_eq!(costs.total_group_cost, Decimal::from(13600));
}

#[test]
fn warnings_never_block_aggregation_or_validation() {
    let mut draft = QuotationDraft::new(&SessionContext::default());
    draft.client.name = "Solo Traveller".to_owned();
    draft.travel.travel_date = chrono::NaiveDate::from_ymd_opt(2026, 10, 1);
    draft.travel.group_size = 1;
    draft.travel.declared_total_nights = 5;
    draft.accommodations.push(AccommodationLineItem {
        location: "Phuket".to_owned(),
        hotel_name: CatalogChoice::Custom("Guest house".to_owned()),
        room_type: String::new(),
        nights: 4,
        price_per_night: Decimal::from(800),
    });
    draft.activities.push(ActivityLineItem::new(
        "Zoo entry",
        "",
        Decimal::from(400),
        Decimal::from(150),
        1,
    ));

    let warnings = check_warnings(&draft);
    assert!(warnings
        .iter()
        .any(|w| matches!(w, QuotationWarning::NightsMismatch { declared: 5, accommodated: 4 })));
    assert!(warnings
        .iter()
        .any(|w| matches!(w, QuotationWarning::ChildPriceForSoloTraveler { .. })));

    // Both checks stay advisory.
    validate(&draft).expect("warnings do not block submission");
    let costs = aggregate(&draft);
    assert_eq!(costs.total_nights, 4);
}

#[test]
fn display_conversion_never_changes_canonical_totals() {
    let table = vec![CurrencyConversion {
        country_id: thailand(),
        currency_code: "THB".to_owned(),
        conversion_rate: Decimal::new(42, 2),
    }];

    let mut draft = QuotationDraft::new(&SessionContext {
        selected_country_id: Some(thailand()),
    });
    draft.travel.group_size = 2;
    draft.flight_cost_per_person = Decimal::from(5000);

    let costs = aggregate(&draft);
    let conversion = resolve_conversion(draft.travel.country_id.as_ref(), &table);
    let display = conversion.apply(costs.total_per_head);

    assert_eq!(display, Decimal::new(2100_00, 2));
    // The canonical figure stays base-currency.
    assert_eq!(costs.total_per_head, Decimal::from(5000));

    let unknown = resolve_conversion(Some(&CountryId("country-xx".to_owned())), &table);
    assert_eq!(unknown.currency_code, "INR");
    assert_eq!(unknown.apply(costs.total_per_head), costs.total_per_head);
}
