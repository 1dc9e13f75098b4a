/// Static entries of the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedItem {
    pub id: &'static str,
    pub title: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeaturedRestaurant {
    pub id: &'static str,
    pub name: &'static str,
    pub delivery_time: &'static str,
}

pub const CATEGORIES: [FeedItem; 4] = [
    FeedItem { id: "1", title: "Food delivery" },
    FeedItem { id: "2", title: "Take Away" },
    FeedItem { id: "3", title: "Mart" },
    FeedItem { id: "4", title: "Discounts" },
];

pub const CUISINES: [FeedItem; 4] = [
    FeedItem { id: "1", title: "Fast Food" },
    FeedItem { id: "2", title: "Paratha" },
    FeedItem { id: "3", title: "Sweets" },
    FeedItem { id: "4", title: "Pakistani" },
];

pub const FEATURED_RESTAURANTS: [FeaturedRestaurant; 3] = [
    FeaturedRestaurant { id: "1", name: "Cheezious", delivery_time: "30 min" },
    FeaturedRestaurant { id: "2", name: "Savour Foods", delivery_time: "30 min" },
    FeaturedRestaurant { id: "3", name: "Subway - Lahore", delivery_time: "30 min" },
];
