use super::{ImageCategory, WordCategory};

const WORDS: &[(&str, &str, [&str; 8])] = &[
    ("cat_fruits", "Fruits", ["Pomme", "Banane", "Fraise", "Orange", "Poire", "Mangue", "Raisin", "Citron"]),
    ("cat_vegetables", "Légumes", ["Carotte", "Tomate", "Poivron", "Courgette", "Aubergine", "Brocoli", "Concombre", "Épinard"]),
    ("cat_dairy", "Produits laitiers", ["Lait", "Beurre", "Fromage", "Yaourt", "Crème", "Kéfir", "Mozzarella", "Comté"]),
    ("cat_spices", "Épices", ["Poivre", "Cumin", "Paprika", "Curcuma", "Cannelle", "Gingembre", "Safran", "Muscade"]),
    ("cat_mammals", "Mammifères", ["Lion", "Dauphin", "Cheval", "Ours", "Chien", "Chat", "Singe", "Loup"]),
    ("cat_birds", "Oiseaux", ["Aigle", "Pigeon", "Moineau", "Hibou", "Canard", "Cygne", "Corbeau", "Perroquet"]),
    ("cat_fish", "Poissons", ["Saumon", "Thon", "Truite", "Sardine", "Bar", "Carpe", "Maquereau", "Requin"]),
    ("cat_insects", "Insectes", ["Abeille", "Fourmi", "Coccinelle", "Papillon", "Moustique", "Libellule", "Sauterelle", "Scarabée"]),
    ("cat_transport", "Transports", ["Avion", "Train", "Métro", "Vélo", "Voiture", "Bateau", "Bus", "Tram"]),
    ("cat_places", "Lieux de voyage", ["Hôtel", "Aéroport", "Gare", "Musée", "Plage", "Montagne", "Port", "Temple"]),
    ("cat_items", "Objets de voyage", ["Valise", "Passeport", "Carte", "Billet", "Appareil", "Guide", "Chargeur", "Boussole"]),
    ("cat_sports_ball", "Sports de ballon", ["Football", "Basketball", "Handball", "Volleyball", "Rugby", "Baseball", "Futsal", "Water-polo"]),
    ("cat_sports_racket", "Sports de raquette", ["Tennis", "Badminton", "Squash", "Padel", "Ping-pong", "Racquetball", "Pelote", "Frontenis"]),
    ("cat_sports_martial", "Sports de combat", ["Judo", "Karaté", "Boxe", "Taekwondo", "Aïkido", "Lutte", "Escrime", "Krav-maga"]),
    ("cat_sports_water", "Sports aquatiques", ["Natation", "Plongée", "Canoë", "Kayak", "Aviron", "Kitesurf", "Paddle", "Snorkeling"]),
    ("cat_nature_trees", "Arbres", ["Chêne", "Hêtre", "Pin", "Sapin", "Bouleau", "Érable", "Olivier", "Tilleul"]),
    ("cat_nature_flowers", "Fleurs", ["Rose", "Tulipe", "Marguerite", "Coquelicot", "Lys", "Orchidée", "Lavande", "Tournesol"]),
    ("cat_nature_landscapes", "Paysages", ["Forêt", "Désert", "Lac", "Rivière", "Cascade", "Vallée", "Falaise", "Glacier"]),
    ("cat_nature_weather", "Météo", ["Pluie", "Vent", "Brouillard", "Orage", "Neige", "Canicule", "Gel", "Arc-en-ciel"]),
    ("cat_nature_animals_wild", "Animaux sauvages", ["Renard", "Cerf", "Sanglier", "Lynx", "Hérisson", "Blaireau", "Chamois", "Loutre"]),
    ("cat_tech_devices", "Appareils", ["Smartphone", "Tablette", "Ordinateur", "Casque", "Montre", "Console", "Imprimante", "Routeur"]),
    ("cat_tech_internet", "Internet", ["Wi-Fi", "Navigateur", "Serveur", "Cloud", "Email", "Streaming", "Cookie", "Lien"]),
];

const IMAGES: &[(&str, &str, [&str; 8])] = &[
    ("img_fruits", "Fruits", ["🍎", "🍌", "🍓", "🍊", "🍐", "🥭", "🍇", "🍋"]),
    ("img_vegetables", "Légumes", ["🥕", "🍅", "🫑", "🥒", "🍆", "🥦", "🌽", "🥬"]),
    ("img_animals", "Animaux", ["🦁", "🐬", "🐴", "🐻", "🐶", "🐱", "🐵", "🐺"]),
    ("img_weather", "Météo", ["☀️", "⛅", "☁️", "🌧️", "⛈️", "❄️", "🌈", "🌪️"]),
    ("img_sports", "Sports", ["⚽", "🏀", "🏈", "⚾", "🎾", "🏐", "🏓", "🏸"]),
    ("img_transport", "Transports", ["✈️", "🚂", "🚇", "🚲", "🚗", "🚢", "🚌", "🚕"]),
    ("img_food", "Nourriture", ["🍕", "🍔", "🌮", "🍜", "🍱", "🥗", "🍰", "🍦"]),
    ("img_space", "Espace", ["🌍", "🌙", "⭐", "☄️", "🪐", "🚀", "🛸", "🌌"]),
    ("img_music", "Musique", ["🎸", "🎹", "🎺", "🎷", "🥁", "🎻", "🎤", "🎧"]),
    ("img_ocean", "Océan", ["🐠", "🐟", "🐡", "🦈", "🐙", "🦑", "🦀", "🦞"]),
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

pub(super) fn word_categories() -> Vec<WordCategory> {
    WORDS
        .iter()
        .map(|(id, label, words)| WordCategory {
            id: id.to_string(),
            label: label.to_string(),
            words: owned(words),
        })
        .collect()
}

pub(super) fn image_categories() -> Vec<ImageCategory> {
    IMAGES
        .iter()
        .map(|(id, label, images)| ImageCategory {
            id: id.to_string(),
            label: label.to_string(),
            images: owned(images),
        })
        .collect()
}
